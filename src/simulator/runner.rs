//! Batch simulation driver.
//!
//! Runs many independent single-run simulations and reduces them into a
//! [`SimReport`]. Each run gets its own seeded RNG stream, so a seeded
//! batch is reproducible and the parallel driver tallies exactly the same
//! runs a sequential one would.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::config::SimConfig;
use super::report::SimReport;
use super::run::{simulate_single_run, RunOutcome};
use crate::banner::{GachaRates, RatesError};

/// A batch request that cannot be simulated.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    InvalidRates(RatesError),
    NoRuns,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidRates(e) => write!(f, "invalid rates: {e}"),
            SimError::NoRuns => write!(f, "num_runs must be positive"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::InvalidRates(e) => Some(e),
            SimError::NoRuns => None,
        }
    }
}

impl From<RatesError> for SimError {
    fn from(e: RatesError) -> Self {
        SimError::InvalidRates(e)
    }
}

/// Cooperative cancellation flag for a long batch.
///
/// Checked between runs, never mid-run, so a cancelled batch still yields
/// an internally consistent partial report.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

fn validate(config: &SimConfig, rates: &GachaRates) -> Result<(), SimError> {
    rates.validate()?;
    if config.num_runs == 0 {
        return Err(SimError::NoRuns);
    }
    Ok(())
}

/// RNG stream for one run. Seeded batches give run `i` its own
/// deterministic stream; unseeded batches pull fresh entropy per run.
fn run_rng(seed: Option<u64>, run_idx: u32) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Run the full batch and return a report.
pub fn run_simulation(config: &SimConfig, rates: &GachaRates) -> Result<SimReport, SimError> {
    run_simulation_cancellable(config, rates, &CancelToken::new())
}

/// Run the batch, checking `cancel` before each run. A cancelled batch
/// reports only the runs it completed, flagged as cancelled.
pub fn run_simulation_cancellable(
    config: &SimConfig,
    rates: &GachaRates,
    cancel: &CancelToken,
) -> Result<SimReport, SimError> {
    validate(config, rates)?;

    let mut outcomes = Vec::with_capacity(config.num_runs as usize);
    let mut cancelled = false;

    for run_idx in 0..config.num_runs {
        if cancel.is_cancelled() {
            cancelled = true;
            break;
        }

        let mut rng = run_rng(config.seed, run_idx);
        let outcome = simulate_single_run(
            config.starting_pity,
            config.starting_spark,
            config.max_pulls,
            rates,
            &mut rng,
        );

        if config.verbosity >= 2 {
            match outcome {
                RunOutcome::Featured { pulls } => println!(
                    "Run {}/{} - featured in {} pulls",
                    run_idx + 1,
                    config.num_runs,
                    pulls
                ),
                RunOutcome::Exhausted => println!(
                    "Run {}/{} - exhausted after {} pulls",
                    run_idx + 1,
                    config.num_runs,
                    config.max_pulls
                ),
            }
        }

        outcomes.push(outcome);
    }

    Ok(SimReport::from_outcomes(&outcomes, cancelled))
}

/// Run the batch across worker threads.
///
/// Runs share nothing mutable: each worker owns a slice of run indices and
/// every run keeps its own RNG stream, so merging is plain accumulation
/// and a seeded parallel batch matches its sequential counterpart.
pub fn run_simulation_parallel(
    config: &SimConfig,
    rates: &GachaRates,
    num_threads: usize,
    cancel: &CancelToken,
) -> Result<SimReport, SimError> {
    validate(config, rates)?;

    let threads = num_threads.max(1).min(config.num_runs as usize);
    let chunk = (config.num_runs as usize + threads - 1) / threads;

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(threads);

        for t in 0..threads {
            let start = (t * chunk) as u32;
            let end = (((t + 1) * chunk) as u32).min(config.num_runs);
            if start >= end {
                break;
            }

            handles.push(scope.spawn(move || {
                let mut outcomes = Vec::with_capacity((end - start) as usize);
                for run_idx in start..end {
                    if cancel.is_cancelled() {
                        return (outcomes, true);
                    }
                    let mut rng = run_rng(config.seed, run_idx);
                    outcomes.push(simulate_single_run(
                        config.starting_pity,
                        config.starting_spark,
                        config.max_pulls,
                        rates,
                        &mut rng,
                    ));
                }
                (outcomes, false)
            }));
        }

        let mut all = Vec::with_capacity(config.num_runs as usize);
        let mut cancelled = false;

        for handle in handles {
            let (mut outcomes, was_cancelled) =
                handle.join().expect("simulation worker panicked");
            all.append(&mut outcomes);
            cancelled |= was_cancelled;
        }

        Ok(SimReport::from_outcomes(&all, cancelled))
    })
}

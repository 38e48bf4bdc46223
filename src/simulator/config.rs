//! Simulation configuration.

use crate::constants::DEFAULT_SIM_RUNS;

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Pity counter already banked when the batch starts
    pub starting_pity: u32,

    /// Spark counter already banked when the batch starts
    pub starting_spark: u32,

    /// Pull budget per run
    pub max_pulls: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: DEFAULT_SIM_RUNS,
            seed: None,
            starting_pity: 0,
            starting_spark: 0,
            max_pulls: 120,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a fast sanity check
    pub fn quick() -> Self {
        Self {
            num_runs: 1_000,
            ..Default::default()
        }
    }

    /// Config for checking the odds of a specific pull budget
    pub fn banner_budget(max_pulls: u32) -> Self {
        Self {
            max_pulls,
            ..Default::default()
        }
    }
}

//! Single-run simulator: one player pulling until the featured six-star
//! lands or the budget runs out.

use rand::Rng;

use crate::banner::GachaRates;
use crate::rates::six_star_rate;

/// How a single run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Featured six-star obtained after this many pulls
    Featured { pulls: u32 },
    /// Budget spent without the featured six-star
    Exhausted,
}

impl RunOutcome {
    /// Pulls to the featured six-star, None for an exhausted run.
    pub fn pulls(&self) -> Option<u32> {
        match self {
            RunOutcome::Featured { pulls } => Some(*pulls),
            RunOutcome::Exhausted => None,
        }
    }
}

/// Simulate one full run from the given counters.
///
/// Every run terminates: either the featured six-star lands (by rate or by
/// spark guarantee) or `max_pulls` is spent. The spark check runs before
/// the rate roll each pull and takes priority; a spark success bypasses
/// the rate model and leaves pity untouched. An off-banner six-star resets
/// pity but never the spark counter.
pub fn simulate_single_run(
    starting_pity: u32,
    starting_spark: u32,
    max_pulls: u32,
    rates: &GachaRates,
    rng: &mut impl Rng,
) -> RunOutcome {
    let mut pity = starting_pity;
    let mut spark = starting_spark;
    let mut pulls = 0u32;

    while pulls < max_pulls {
        pulls += 1;
        spark += 1;

        if spark >= rates.spark_threshold {
            return RunOutcome::Featured { pulls };
        }

        if rng.gen::<f64>() < six_star_rate(pity, rates) {
            pity = 0;
            if rng.gen::<f64>() < rates.featured_share {
                return RunOutcome::Featured { pulls };
            }
            // Lost the 50/50; spark keeps counting
        } else {
            pity += 1;
        }
    }

    RunOutcome::Exhausted
}

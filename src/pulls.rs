//! Interactive pull session: the mechanic behind single and ten-pull mode.
//!
//! Unlike the simulator, a session keeps rolling after the featured unit
//! lands; it mirrors what a player sees pull by pull.

use rand::Rng;

use crate::banner::GachaRates;
use crate::rates::six_star_rate;

/// What a single pull produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    Featured,
    OffBanner,
    Miss,
}

impl PullOutcome {
    pub fn is_six_star(&self) -> bool {
        !matches!(self, PullOutcome::Miss)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PullOutcome::Featured => "FEATURED 6★ !!!",
            PullOutcome::OffBanner => "6★ (off-banner)",
            PullOutcome::Miss => "No 6★",
        }
    }
}

/// Live pity/spark counters across a pull session.
#[derive(Debug, Clone, Default)]
pub struct PullSession {
    pub pity: u32,
    pub spark: u32,
    pub total_pulls: u32,
}

impl PullSession {
    pub fn new(pity: u32, spark: u32) -> Self {
        Self {
            pity,
            spark,
            total_pulls: 0,
        }
    }

    /// Execute one pull and update the counters.
    ///
    /// The spark guarantee is checked before the rate roll and counts as a
    /// featured six-star. Any six-star resets pity; the spark counter climbs
    /// on every pull regardless of outcome.
    pub fn pull(&mut self, rates: &GachaRates, rng: &mut impl Rng) -> PullOutcome {
        let outcome = if self.spark + 1 >= rates.spark_threshold {
            PullOutcome::Featured
        } else if rng.gen::<f64>() < six_star_rate(self.pity, rates) {
            if rng.gen::<f64>() < rates.featured_share {
                PullOutcome::Featured
            } else {
                PullOutcome::OffBanner
            }
        } else {
            PullOutcome::Miss
        };

        self.pity = if outcome.is_six_star() { 0 } else { self.pity + 1 };
        self.spark += 1;
        self.total_pulls += 1;

        outcome
    }

    /// The ten-pull button.
    pub fn pull_ten(&mut self, rates: &GachaRates, rng: &mut impl Rng) -> Vec<PullOutcome> {
        (0..10).map(|_| self.pull(rates, rng)).collect()
    }
}

//! Banner model: rate constants, schedule info, and pull planning helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rates::hard_pity;

/// Probability constants for a banner.
///
/// Validated once per simulation request; the engine never clamps values
/// silently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GachaRates {
    /// Six-star probability per pull before soft pity engages
    pub base_rate: f64,

    /// Pity value (inclusive) at which the rate starts climbing
    pub soft_pity_start: u32,

    /// Probability added per pity step inside the soft-pity window
    pub soft_pity_increment: f64,

    /// Chance that a six-star is the featured one (the 50/50)
    pub featured_share: f64,

    /// Pull count at which the featured six-star is guaranteed
    pub spark_threshold: u32,
}

impl Default for GachaRates {
    fn default() -> Self {
        Self {
            base_rate: 0.02,
            soft_pity_start: 66,
            soft_pity_increment: 0.06,
            featured_share: 0.5,
            spark_threshold: 120,
        }
    }
}

/// A rate constant outside its documented domain.
#[derive(Debug, Clone, PartialEq)]
pub enum RatesError {
    BaseRate(f64),
    SoftPityIncrement(f64),
    FeaturedShare(f64),
    SparkThreshold,
}

impl fmt::Display for RatesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatesError::BaseRate(v) => {
                write!(f, "base_rate must be in (0, 1], got {v}")
            }
            RatesError::SoftPityIncrement(v) => {
                write!(f, "soft_pity_increment must be positive, got {v}")
            }
            RatesError::FeaturedShare(v) => {
                write!(f, "featured_share must be in (0, 1], got {v}")
            }
            RatesError::SparkThreshold => write!(f, "spark_threshold must be positive"),
        }
    }
}

impl std::error::Error for RatesError {}

impl GachaRates {
    /// Check every constant against its domain. Fails fast so a bad value
    /// never reaches the simulation loop.
    pub fn validate(&self) -> Result<(), RatesError> {
        if !(self.base_rate > 0.0 && self.base_rate <= 1.0) {
            return Err(RatesError::BaseRate(self.base_rate));
        }
        if !(self.soft_pity_increment > 0.0) {
            return Err(RatesError::SoftPityIncrement(self.soft_pity_increment));
        }
        if !(self.featured_share > 0.0 && self.featured_share <= 1.0) {
            return Err(RatesError::FeaturedShare(self.featured_share));
        }
        if self.spark_threshold == 0 {
            return Err(RatesError::SparkThreshold);
        }
        Ok(())
    }
}

/// A scheduled banner with its end date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub name: String,
    pub end_date: DateTime<Utc>,
}

impl Banner {
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_date
    }

    /// Whole days left on the banner, never negative.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.end_date - now).num_days().max(0)
    }
}

/// Convert an Oroberyl balance into a pull budget.
pub fn max_pulls_for_oroberyl(oroberyl: u64, oro_per_pull: u64) -> u32 {
    if oro_per_pull == 0 {
        return 0;
    }
    (oroberyl / oro_per_pull).min(u32::MAX as u64) as u32
}

/// How a pull budget measures up against the banner's guarantees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullPlan {
    /// Pulls until the rate model guarantees a six-star
    pub pulls_to_hard_pity: u32,

    /// Pulls until the spark guarantees the featured six-star
    pub pulls_to_spark: u32,

    /// Whether the budget covers the distance to the spark
    pub spark_reachable: bool,
}

impl PullPlan {
    pub fn assess(pity: u32, spark: u32, budget: u32, rates: &GachaRates) -> Self {
        let pulls_to_spark = rates.spark_threshold.saturating_sub(spark);
        Self {
            pulls_to_hard_pity: hard_pity(rates).saturating_sub(pity),
            pulls_to_spark,
            spark_reachable: budget >= pulls_to_spark,
        }
    }

    /// Pulls missing from the budget to reach the spark (0 when reachable).
    pub fn spark_shortfall(&self, budget: u32) -> u32 {
        self.pulls_to_spark.saturating_sub(budget)
    }
}

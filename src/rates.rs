//! Six-star rate model: flat base rate until soft pity engages, then a
//! linear ramp that clamps at a guaranteed pull.

use crate::banner::GachaRates;

/// Current six-star probability for a given pity counter.
///
/// Below `soft_pity_start` the rate is flat. From there each additional
/// pity step adds `soft_pity_increment`, capped at 1.0. The first pity
/// value inside the soft-pity window already sits one increment above
/// base; when soft pity starts at 0 the ramp begins at zero offset
/// instead (no negative offsets).
pub fn six_star_rate(pity: u32, rates: &GachaRates) -> f64 {
    if pity < rates.soft_pity_start {
        return rates.base_rate;
    }
    let steps = pity - rates.soft_pity_start.saturating_sub(1);
    (rates.base_rate + steps as f64 * rates.soft_pity_increment).min(1.0)
}

/// Smallest pity value at which the rate reaches 1.0 (a guaranteed six-star).
pub fn hard_pity(rates: &GachaRates) -> u32 {
    if rates.base_rate >= 1.0 {
        return 0;
    }
    let headroom = 1.0 - rates.base_rate;
    let steps = (headroom / rates.soft_pity_increment).ceil() as u32;
    rates.soft_pity_start.saturating_sub(1) + steps
}

//! Simulation report: reduction of run outcomes into summary statistics.

use super::run::RunOutcome;
use crate::constants::{HISTOGRAM_CEILING, WORST_CASE_PERCENTILE};

/// Aggregated results from a batch of simulation runs.
#[derive(Debug, Clone)]
pub struct SimReport {
    /// Runs actually attempted (equals the request unless cancelled)
    pub num_runs: u32,

    /// Pulls-to-featured for every successful run, sorted ascending
    pub successes: Vec<u32>,

    /// Runs that spent the whole budget without the featured six-star
    pub exhausted: u32,

    /// Fraction of attempted runs that succeeded, in [0, 1]
    pub success_rate: f64,

    /// Mean pulls-to-featured; None when no run succeeded
    pub avg_pulls_to_featured: Option<f64>,

    /// Frequency of pulls-to-featured. Bucket `i` counts runs that needed
    /// `i + 1` pulls; the final bucket absorbs anything past the ceiling.
    pub histogram: Vec<u32>,

    /// Whether the batch was cancelled before finishing
    pub cancelled: bool,
}

impl SimReport {
    /// Reduce raw run outcomes into a report.
    pub fn from_outcomes(outcomes: &[RunOutcome], cancelled: bool) -> Self {
        let num_runs = outcomes.len() as u32;

        let mut successes: Vec<u32> = outcomes.iter().filter_map(|o| o.pulls()).collect();
        successes.sort_unstable();
        let exhausted = num_runs - successes.len() as u32;

        let success_rate = if num_runs == 0 {
            0.0
        } else {
            successes.len() as f64 / num_runs as f64
        };

        let avg_pulls_to_featured = if successes.is_empty() {
            None
        } else {
            Some(successes.iter().map(|&p| p as f64).sum::<f64>() / successes.len() as f64)
        };

        let mut histogram = vec![0u32; HISTOGRAM_CEILING + 1];
        for &pulls in &successes {
            // Pulls count from 1, buckets from 0
            let bucket = (pulls as usize - 1).min(HISTOGRAM_CEILING);
            histogram[bucket] += 1;
        }

        Self {
            num_runs,
            successes,
            exhausted,
            success_rate,
            avg_pulls_to_featured,
            histogram,
            cancelled,
        }
    }

    /// Pulls-to-featured at percentile `p` (0.0..=1.0), None when no run
    /// succeeded.
    pub fn percentile(&self, p: f64) -> Option<u32> {
        if self.successes.is_empty() {
            return None;
        }
        let idx = ((self.successes.len() as f64 * p) as usize).min(self.successes.len() - 1);
        Some(self.successes[idx])
    }

    /// The "worst case" stat: 95th percentile pulls-to-featured.
    pub fn percentile_95(&self) -> Option<u32> {
        self.percentile(WORST_CASE_PERCENTILE)
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    PULL SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} hit featured, {} exhausted{}\n\n",
            self.num_runs,
            self.successes.len(),
            self.exhausted,
            if self.cancelled { " (cancelled early)" } else { "" }
        ));

        report.push_str("── RESULTS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Success Rate:          {:.1}%\n",
            self.success_rate * 100.0
        ));
        match self.avg_pulls_to_featured {
            Some(avg) => {
                report.push_str(&format!("  Avg Pulls to Featured: {:.1}\n", avg));
            }
            None => {
                report.push_str("  Avg Pulls to Featured: n/a (no run succeeded)\n");
            }
        }
        match self.percentile_95() {
            Some(p95) => {
                report.push_str(&format!("  Worst Case (95th %):   {}\n\n", p95));
            }
            None => {
                report.push_str("  Worst Case (95th %):   n/a\n\n");
            }
        }

        if !self.successes.is_empty() {
            report.push_str("── PULLS TO FEATURED ────────────────────────────────────────────\n");
            let band_width = 10;
            for band_start in (0..HISTOGRAM_CEILING).step_by(band_width) {
                let band_end = (band_start + band_width).min(HISTOGRAM_CEILING);
                let count: u32 = self.histogram[band_start..band_end].iter().sum();
                let pct = (count as f64 / self.successes.len() as f64) * 100.0;
                let bar: String = "█".repeat((pct / 2.0) as usize);
                report.push_str(&format!(
                    "  {:>3}-{:<3} {:>5.1}% {}\n",
                    band_start + 1,
                    band_end,
                    pct,
                    bar
                ));
            }
            let overflow = self.histogram[HISTOGRAM_CEILING];
            if overflow > 0 {
                let pct = (overflow as f64 / self.successes.len() as f64) * 100.0;
                report.push_str(&format!("  >{:<5} {:>5.1}%\n", HISTOGRAM_CEILING, pct));
            }
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl serde::Serialize for SimReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SimReport", 7)?;
        state.serialize_field("num_runs", &self.num_runs)?;
        state.serialize_field("successes", &(self.successes.len() as u32))?;
        state.serialize_field("exhausted", &self.exhausted)?;
        state.serialize_field("success_rate", &self.success_rate)?;
        state.serialize_field("avg_pulls_to_featured", &self.avg_pulls_to_featured)?;
        state.serialize_field("percentile_95", &self.percentile_95())?;
        state.serialize_field("histogram", &self.histogram)?;
        state.end()
    }
}

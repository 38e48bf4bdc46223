// Histogram display constants
pub const HISTOGRAM_CEILING: usize = 120;
pub const WORST_CASE_PERCENTILE: f64 = 0.95;

// Simulation defaults
pub const DEFAULT_SIM_RUNS: u32 = 50_000;

// Economy constants
pub const DEFAULT_ORO_PER_PULL: u64 = 600;

//! Monte Carlo pull simulator.
//!
//! Run thousands of simulated pull sessions to estimate:
//! - Average pulls to the featured six-star
//! - Odds of success within a pull budget
//! - The full pulls-to-featured distribution
//!
//! Each run is independent and rolls against the rate model
//! (src/rates.rs), so simulated odds match what a real session would see.

mod config;
mod report;
mod run;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use run::{simulate_single_run, RunOutcome};
pub use runner::{
    run_simulation, run_simulation_cancellable, run_simulation_parallel, CancelToken, SimError,
};

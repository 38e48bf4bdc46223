//! Integration test: Monte Carlo simulation engine
//!
//! Drives the public simulator API end to end: the live banner scenario,
//! budget sensitivity, conservation invariants, cancellation, and
//! parallel/sequential agreement. Statistical assertions use generous
//! tolerances around seeded runs.

use gachasim::banner::GachaRates;
use gachasim::constants::HISTOGRAM_CEILING;
use gachasim::simulator::{
    run_simulation, run_simulation_cancellable, run_simulation_parallel, CancelToken, SimConfig,
    SimError,
};

fn config(num_runs: u32, max_pulls: u32, seed: u64) -> SimConfig {
    SimConfig {
        num_runs,
        seed: Some(seed),
        max_pulls,
        verbosity: 0,
        ..Default::default()
    }
}

// =========================================================================
// Concrete banner scenarios
// =========================================================================

#[test]
fn test_full_budget_spark_caps_every_run() {
    // 120 pulls against a 120 spark: the guarantee alone makes every run
    // succeed within budget
    let report = run_simulation(&config(20_000, 120, 42), &GachaRates::default())
        .expect("sim should run");

    assert_eq!(report.num_runs, 20_000);
    assert!(
        (report.success_rate - 1.0).abs() < f64::EPSILON,
        "Spark at 120 must cap every 120-pull run, got rate {}",
        report.success_rate
    );
    assert_eq!(report.exhausted, 0);

    let avg = report
        .avg_pulls_to_featured
        .expect("successes exist, avg must too");
    assert!(
        avg < 100.0,
        "Rate-based early successes should pull the mean well below 120, got {avg}"
    );

    let p95 = report.percentile_95().expect("percentile must exist");
    assert!(p95 <= 120, "No successful run can exceed the budget");
}

#[test]
fn test_ten_pull_budget_rarely_succeeds() {
    // 10 pulls at ~1% featured chance per pull: success should be rare but
    // not impossible over 20k runs
    let report = run_simulation(&config(20_000, 10, 42), &GachaRates::default())
        .expect("sim should run");

    assert!(
        report.success_rate > 0.02,
        "Ten pulls should land the featured sometimes, got {}",
        report.success_rate
    );
    assert!(
        report.success_rate < 0.30,
        "Ten low-rate pulls cannot succeed this often, got {}",
        report.success_rate
    );
}

#[test]
fn test_banked_pity_improves_odds() {
    // Starting deep in soft pity should beat a fresh account on a short budget
    let fresh = run_simulation(&config(10_000, 20, 7), &GachaRates::default())
        .expect("sim should run");

    let mut deep = config(10_000, 20, 7);
    deep.starting_pity = 70;
    let deep = run_simulation(&deep, &GachaRates::default()).expect("sim should run");

    assert!(
        deep.success_rate > fresh.success_rate + 0.1,
        "70 banked pity should clearly beat 0 ({} vs {})",
        deep.success_rate,
        fresh.success_rate
    );
}

// =========================================================================
// Invariants
// =========================================================================

#[test]
fn test_every_run_counted_exactly_once() {
    let report = run_simulation(&config(5_000, 60, 9), &GachaRates::default())
        .expect("sim should run");

    assert_eq!(
        report.successes.len() as u32 + report.exhausted,
        report.num_runs,
        "Each run is either a success or exhausted"
    );
}

#[test]
fn test_histogram_accounts_for_every_success() {
    let report = run_simulation(&config(5_000, 200, 11), &GachaRates::default())
        .expect("sim should run");

    assert_eq!(report.histogram.len(), HISTOGRAM_CEILING + 1);
    let sum: u32 = report.histogram.iter().sum();
    assert_eq!(sum as usize, report.successes.len());
}

#[test]
fn test_successes_sorted_and_within_budget() {
    let report = run_simulation(&config(5_000, 90, 13), &GachaRates::default())
        .expect("sim should run");

    assert!(report.successes.windows(2).all(|w| w[0] <= w[1]));
    assert!(report.successes.iter().all(|&p| p >= 1 && p <= 90));
}

#[test]
fn test_success_rate_monotone_in_budget() {
    // More pulls can only help. Tolerance covers seed-to-seed noise between
    // independent batches.
    let budgets = [10, 30, 60, 90, 120];
    let mut prev = 0.0;

    for budget in budgets {
        let report = run_simulation(&config(10_000, budget, 17), &GachaRates::default())
            .expect("sim should run");
        assert!(
            report.success_rate >= prev - 0.01,
            "Success rate dropped when budget grew to {budget}: {} < {}",
            report.success_rate,
            prev
        );
        prev = report.success_rate;
    }
}

#[test]
fn test_budget_preset_carries_the_budget() {
    let mut cfg = SimConfig::banner_budget(45);
    cfg.num_runs = 2_000;
    cfg.seed = Some(41);
    cfg.verbosity = 0;

    let report = run_simulation(&cfg, &GachaRates::default()).expect("sim should run");

    assert_eq!(report.num_runs, 2_000);
    assert!(report.successes.iter().all(|&p| p <= 45));
}

#[test]
fn test_zero_budget_exhausts_every_run() {
    let report = run_simulation(&config(1_000, 0, 19), &GachaRates::default())
        .expect("zero budget is a boundary case, not an error");

    assert_eq!(report.exhausted, 1_000);
    assert_eq!(report.success_rate, 0.0);
    assert_eq!(report.avg_pulls_to_featured, None);
    assert_eq!(report.percentile_95(), None);
}

#[test]
fn test_hopeless_rates_report_unavailable_not_nan() {
    // Six-stars essentially never happen and the spark is out of reach
    let rates = GachaRates {
        base_rate: 1e-12,
        featured_share: 1e-12,
        spark_threshold: 10_000,
        ..GachaRates::default()
    };

    let report = run_simulation(&config(500, 50, 23), &rates).expect("sim should run");

    assert_eq!(report.success_rate, 0.0);
    assert_eq!(report.avg_pulls_to_featured, None, "No NaN, an explicit None");
    assert_eq!(report.percentile_95(), None);
}

// =========================================================================
// Failure taxonomy
// =========================================================================

#[test]
fn test_invalid_constants_fail_fast() {
    let bad_rate = GachaRates {
        base_rate: 1.2,
        ..GachaRates::default()
    };
    assert!(matches!(
        run_simulation(&config(10, 10, 1), &bad_rate),
        Err(SimError::InvalidRates(_))
    ));

    let bad_spark = GachaRates {
        spark_threshold: 0,
        ..GachaRates::default()
    };
    assert!(matches!(
        run_simulation(&config(10, 10, 1), &bad_spark),
        Err(SimError::InvalidRates(_))
    ));

    assert_eq!(
        run_simulation(&config(0, 10, 1), &GachaRates::default()).unwrap_err(),
        SimError::NoRuns
    );
}

// =========================================================================
// Concurrency and cancellation
// =========================================================================

#[test]
fn test_parallel_and_sequential_agree_on_seeded_batches() {
    let cfg = config(4_000, 100, 29);
    let rates = GachaRates::default();

    let sequential = run_simulation(&cfg, &rates).expect("sim should run");
    let parallel =
        run_simulation_parallel(&cfg, &rates, 8, &CancelToken::new()).expect("sim should run");

    assert_eq!(sequential.successes, parallel.successes);
    assert_eq!(sequential.exhausted, parallel.exhausted);
    assert_eq!(sequential.histogram, parallel.histogram);
}

#[test]
fn test_cancellation_yields_consistent_partial_report() {
    let cancel = CancelToken::new();
    cancel.cancel();

    let report = run_simulation_cancellable(&config(100_000, 120, 31), &GachaRates::default(), &cancel)
        .expect("cancellation is not an error");

    assert!(report.cancelled);
    assert!(report.num_runs < 100_000);
    assert_eq!(
        report.successes.len() as u32 + report.exhausted,
        report.num_runs,
        "A partial report still balances its books"
    );
}

#[test]
fn test_uncancelled_batch_is_not_flagged() {
    let report = run_simulation_cancellable(
        &config(100, 30, 37),
        &GachaRates::default(),
        &CancelToken::new(),
    )
    .expect("sim should run");

    assert!(!report.cancelled);
    assert_eq!(report.num_runs, 100);
}

//! Banner pull simulator CLI.
//!
//! Run Monte Carlo simulations of pulling for the featured six-star.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 50k runs, 120 pull budget
//!   cargo run --bin simulate -- -p 30 -k 45      # Start from 30 pity, 45 spark
//!   cargo run --bin simulate -- --oro 72000      # Budget from an Oroberyl balance
//!   cargo run --bin simulate -- --seed 42        # Reproducible run

use gachasim::banner::{max_pulls_for_oroberyl, PullPlan};
use gachasim::data::{load_banner_catalog, load_game_data, GameData};
use gachasim::simulator::{
    run_simulation, run_simulation_parallel, CancelToken, SimConfig,
};
use std::env;

struct CliOptions {
    data_path: Option<String>,
    banners_path: Option<String>,
    oroberyl: Option<u64>,
    threads: usize,
    json: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let (mut config, opts) = parse_args(&args);

    let data = match &opts.data_path {
        Some(path) => match load_game_data(path.as_ref()) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GameData::default(),
    };

    if let Some(oro) = opts.oroberyl {
        config.max_pulls = max_pulls_for_oroberyl(oro, data.oro_per_pull);
    }

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              BANNER PULL SIMULATOR                            ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();

    if let Some(path) = &opts.banners_path {
        match load_banner_catalog(path.as_ref()) {
            Ok(catalog) => {
                let now = chrono::Utc::now();
                let banner = &catalog.current;
                if banner.has_ended(now) {
                    println!("Banner: {} (already ended!)", banner.name);
                } else {
                    println!(
                        "Banner: {} ({} days left)",
                        banner.name,
                        banner.days_remaining(now)
                    );
                }
                println!();
            }
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Starting Pity:  {}", config.starting_pity);
    println!("  Starting Spark: {}", config.starting_spark);
    println!("  Pull Budget:    {}", config.max_pulls);
    if let Some(oro) = opts.oroberyl {
        println!("  Oroberyl:       {} ({} per pull)", oro, data.oro_per_pull);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    if opts.threads > 1 {
        println!("  Threads:        {}", opts.threads);
    }
    println!();

    let plan = PullPlan::assess(
        config.starting_pity,
        config.starting_spark,
        config.max_pulls,
        &data.rates,
    );
    if !plan.spark_reachable {
        println!(
            "  ⚠️  Budget ends {} pulls short of the spark — the guarantee will not save this run",
            plan.spark_shortfall(config.max_pulls)
        );
        println!();
    }

    println!("Running simulation...");
    println!();

    let result = if opts.threads > 1 {
        run_simulation_parallel(&config, &data.rates, opts.threads, &CancelToken::new())
    } else {
        run_simulation(&config, &data.rates)
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation rejected: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", report.to_text());

    if opts.json {
        let json = report.to_json();
        let filename = format!(
            "pull_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, json).expect("Failed to write JSON report");
        println!("JSON report saved to: {}", filename);
    }
}

fn parse_args(args: &[String]) -> (SimConfig, CliOptions) {
    let mut config = SimConfig::default();
    let mut opts = CliOptions {
        data_path: None,
        banners_path: None,
        oroberyl: None,
        threads: 1,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(config.num_runs);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-p" | "--pity" => {
                if i + 1 < args.len() {
                    config.starting_pity = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "-k" | "--spark" => {
                if i + 1 < args.len() {
                    config.starting_spark = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "-b" | "--budget" => {
                if i + 1 < args.len() {
                    config.max_pulls = args[i + 1].parse().unwrap_or(config.max_pulls);
                    i += 1;
                }
            }
            "--oro" => {
                if i + 1 < args.len() {
                    opts.oroberyl = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--data" => {
                if i + 1 < args.len() {
                    opts.data_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--banners" => {
                if i + 1 < args.len() {
                    opts.banners_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "-j" | "--threads" => {
                if i + 1 < args.len() {
                    opts.threads = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "--json" => {
                opts.json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, opts)
}

fn print_help() {
    println!("Banner Pull Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 50,000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -p, --pity <P>      Starting pity counter (default: 0)");
    println!("    -k, --spark <K>     Starting spark counter (default: 0)");
    println!("    -b, --budget <B>    Pull budget per run (default: 120)");
    println!("    --oro <AMOUNT>      Derive the pull budget from an Oroberyl balance");
    println!("    --data <FILE>       Load rate constants from a JSON file");
    println!("    --banners <FILE>    Show banner schedule info from a JSON file");
    println!("    -j, --threads <T>   Worker threads (default: 1)");
    println!("    --json              Save JSON report");
    println!("    -v, --verbose       Per-run output");
    println!("    --quick             Quick check (1,000 runs)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                      # Default run");
    println!("    cargo run --bin simulate -- -p 30 -k 45      # Saved pity and spark");
    println!("    cargo run --bin simulate -- --oro 72000      # Budget from currency");
    println!("    cargo run --bin simulate -- --seed 42 -j 8   # Reproducible, 8 threads");
}

//! Chase CLI - drive the pursuit decision pipeline from the shell.
//!
//! - `chase decide` - one decision from a snapshot file or stdin
//! - `chase normalize` - show the strict config a snapshot normalizes to
//! - `chase bench` - time decisions over seeded random grids

mod bench;
mod config;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use chase_ai::{decide, normalize, parse_snapshot, to_snapshot};

use crate::config::{BenchConfig, CliConfig};

#[derive(Parser)]
#[command(name = "chase")]
#[command(about = "Deadline-bounded grid pursuit decisions", version)]
struct Cli {
    /// Config file (defaults to ./chase.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide one move for a snapshot
    Decide {
        /// Snapshot JSON file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the full decision report instead of just the action
        #[arg(long)]
        report: bool,
    },

    /// Print the normalized config, re-encoded as a snapshot
    Normalize {
        /// Snapshot JSON file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Time decisions over seeded random grids
    Bench {
        #[arg(long)]
        width: Option<i64>,

        #[arg(long)]
        height: Option<i64>,

        #[arg(long)]
        iterations: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,

        /// Decision budget per call in milliseconds
        #[arg(long, default_value_t = chase_core::DEFAULT_BUDGET_MS)]
        budget_ms: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries JSON only.
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Decide { input, report } => run_decide(&config, input.as_deref(), report),
        Commands::Normalize { input } => run_normalize(&config, input.as_deref()),
        Commands::Bench {
            width,
            height,
            iterations,
            seed,
            budget_ms,
        } => {
            let mut bench = config.bench.clone();
            bench.width = width.unwrap_or(bench.width);
            bench.height = height.unwrap_or(bench.height);
            bench.iterations = iterations.unwrap_or(bench.iterations);
            bench.seed = seed.unwrap_or(bench.seed);
            run_bench(&bench, budget_ms)
        }
    }
}

fn read_snapshot(config: &CliConfig, input: Option<&Path>) -> Result<serde_json::Value> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read snapshot from stdin")?;
            buf
        }
    };

    let mut snapshot = parse_snapshot(&text).context("Failed to parse snapshot")?;
    config.apply_defaults(&mut snapshot);
    Ok(snapshot)
}

fn print_json<T: Serialize>(config: &CliConfig, value: &T) -> Result<()> {
    let line = if config.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{line}");
    Ok(())
}

fn run_decide(config: &CliConfig, input: Option<&Path>, report: bool) -> Result<()> {
    let snapshot = read_snapshot(config, input)?;
    let decision = decide(&snapshot);

    tracing::info!(
        direction = %decision.action.direction(),
        source = ?decision.source,
        elapsed_us = decision.elapsed_us,
        "Decided"
    );

    if report {
        print_json(config, &decision)
    } else {
        print_json(config, &decision.action)
    }
}

fn run_normalize(config: &CliConfig, input: Option<&Path>) -> Result<()> {
    let snapshot = read_snapshot(config, input)?;
    print_json(config, &to_snapshot(&normalize(&snapshot)))
}

fn run_bench(settings: &BenchConfig, budget_ms: f64) -> Result<()> {
    tracing::info!(
        width = settings.width,
        height = settings.height,
        iterations = settings.iterations,
        seed = settings.seed,
        budget_ms,
        "Starting bench"
    );

    let report = bench::run(settings, budget_ms);

    println!("Chase Bench");
    println!("===========");
    println!();
    println!("Grid: {}x{} ({:.0}% walls)", settings.width, settings.height, settings.wall_density * 100.0);
    println!("Decisions: {}", report.decisions);
    println!(
        "Time (us): min {} / mean {:.1} / max {}",
        report.min_us, report.mean_us, report.max_us
    );
    println!("Over budget: {}", report.over_budget);
    println!();
    println!("Sources:");
    for (source, count) in &report.sources {
        println!("  {source}: {count}");
    }

    Ok(())
}

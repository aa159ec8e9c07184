//! Median Demo CLI
//!
//! Generates the mock records behind the Median product pages and runs the
//! map simulator headless. Every command is reproducible: the same `--seed`
//! and configured `today` print the same records and fingerprints.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- prescriptions --count 20 --json
//!   cargo run -p demo -- --seed 7 sut-search muayene
//!   cargo run -p demo -- simulate --ticks 6 --start-hour 5 --route 40,60

mod report;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use median_clinical::seed::SeedStreams;
use median_config::MedianConfig;
use median_contracts::{batch::BatchSize, error::MedianError, simulation::{GeoPoint, MapPoint}};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Median mock-data service and map simulator demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Median mock-data and map simulator demo",
    long_about = "Generates seeded pharmacy, Medula, and AI-compliance records,\n\
                  filters the SUT and case-study catalogs, and runs the map simulator."
)]
struct Cli {
    /// TOML configuration file. Every key is optional.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured seed for both generators and simulator.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a prescription batch.
    Prescriptions {
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
        /// Keep only this status (e.g. "Hold").
        #[arg(long)]
        status: Option<String>,
        /// Keep only records matching this patient, rx number, or drug.
        #[arg(long)]
        search: Option<String>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Pharmacy dashboard stats over a generated batch.
    PharmacyStats {
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
    },
    /// Search the SUT catalog by code or name.
    SutSearch { query: String },
    /// List the SUT codes of one category.
    SutCategory { category: String },
    /// Generate Medula provisions with their monthly invoices.
    Provisions {
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// Generate the FDA AI-model compliance registry.
    AiModels {
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// List customer case studies.
    CaseStudies {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        product: Option<String>,
    },
    /// Run the map simulator for a number of clock ticks.
    Simulate {
        #[arg(long, default_value_t = 6)]
        ticks: u64,
        #[arg(long)]
        start_hour: Option<u8>,
        /// Request a route to map point X,Y (both 0-100).
        #[arg(long, value_parser = parse_map_point)]
        route: Option<MapPoint>,
        /// Start position LAT,LON. Without it the Istanbul fallback is used.
        #[arg(long, value_parser = parse_geo_point)]
        at: Option<GeoPoint>,
    },
    /// Run every report with the configured counts.
    RunAll,
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Median(#[from] MedianError),

    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DemoResult<T> = Result<T, DemoError>;

// ── Shared run context ────────────────────────────────────────────────────────

/// Configuration resolved from the file and flags, shared by every command.
pub struct Context {
    pub config: MedianConfig,
    pub seeds: SeedStreams,
    pub today: NaiveDate,
}

impl Context {
    fn load(cli: &Cli) -> DemoResult<Self> {
        let mut config = match &cli.config {
            Some(path) => MedianConfig::from_file(path)?,
            None => MedianConfig::default(),
        };
        if let Some(seed) = cli.seed {
            config = config.with_seed(seed);
        }

        let today = config
            .generator
            .today
            .unwrap_or_else(|| chrono::Utc::now().date_naive());
        let seeds = SeedStreams::new(config.generator.seed);

        debug!(seed = seeds.user_seed(), %today, "run context ready");
        Ok(Self { config, seeds, today })
    }

    /// The flag value when given, else the configured default.
    fn count(&self, flag: Option<i64>, configured: usize) -> DemoResult<usize> {
        match flag {
            Some(requested) => Ok(BatchSize::from_signed(requested)?.get()),
            None => Ok(configured),
        }
    }
}

fn parse_pair(value: &str) -> Result<(f64, f64), String> {
    let (a, b) = value
        .split_once(',')
        .ok_or_else(|| format!("expected two numbers separated by a comma, got '{}'", value))?;
    let a = a.trim().parse::<f64>().map_err(|e| format!("'{}': {}", a, e))?;
    let b = b.trim().parse::<f64>().map_err(|e| format!("'{}': {}", b, e))?;
    Ok((a, b))
}

fn parse_map_point(value: &str) -> Result<MapPoint, String> {
    parse_pair(value).map(|(x, y)| MapPoint::new(x, y))
}

fn parse_geo_point(value: &str) -> Result<GeoPoint, String> {
    parse_pair(value).map(|(lat, lon)| GeoPoint { lat, lon })
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> DemoResult<()> {
    let ctx = Context::load(cli)?;
    let defaults = &ctx.config.generator;

    match &cli.command {
        Command::Prescriptions { count, status, search, json } => {
            let count = ctx.count(*count, defaults.prescription_count.get())?;
            report::prescriptions(&ctx, count, status.as_deref(), search.as_deref(), *json)
        }
        Command::PharmacyStats { count } => {
            let count = ctx.count(*count, defaults.prescription_count.get())?;
            report::pharmacy_stats(&ctx, count)
        }
        Command::SutSearch { query } => report::sut_search(query),
        Command::SutCategory { category } => report::sut_category(category),
        Command::Provisions { count, json } => {
            let count = ctx.count(*count, defaults.provision_count.get())?;
            report::provisions(&ctx, count, *json)
        }
        Command::AiModels { count, json } => {
            let count = ctx.count(*count, defaults.ai_model_count.get())?;
            report::ai_models(&ctx, count, *json)
        }
        Command::CaseStudies { category, query, product } => {
            report::case_studies(category.as_deref(), query.as_deref(), product.as_deref())
        }
        Command::Simulate { ticks, start_hour, route, at } => {
            report::simulate(&ctx, *ticks, *start_hour, *route, *at)
        }
        Command::RunAll => run_all(&ctx),
    }
}

fn run_all(ctx: &Context) -> DemoResult<()> {
    print_banner();
    let defaults = &ctx.config.generator;
    report::pharmacy_stats(ctx, defaults.prescription_count.get())?;
    report::sut_search("muayene")?;
    report::provisions(ctx, defaults.provision_count.get(), false)?;
    report::ai_models(ctx, defaults.ai_model_count.get(), false)?;
    report::case_studies(None, None, None)?;
    report::simulate(ctx, 6, None, Some(MapPoint::new(40.0, 60.0)), None)?;
    println!("All reports completed successfully.");
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Median Hospital SaaS: Demo Data");
    println!("===============================");
    println!();
    println!("  [1] Pharmacy: seeded prescription batch, dashboard stats, consistency check");
    println!("  [2] Medula: SUT catalog, provisions, monthly invoices");
    println!("  [3] Compliance: FDA AI-model registry");
    println!("  [4] Case studies");
    println!("  [5] Map simulator: clock, weather, traffic, POIs, navigation");
    println!();
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("demo").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn negative_count_is_rejected_as_invalid_count() {
        let cli = parse(&["prescriptions", "--count", "-5"]);
        match run(&cli) {
            Err(DemoError::Median(MedianError::InvalidCount { requested })) => assert_eq!(requested, -5),
            other => panic!("expected InvalidCount, got {:?}", other.err()),
        }
    }

    #[test]
    fn seed_flag_overrides_config() {
        let cli = parse(&["--seed", "9", "run-all"]);
        let ctx = Context::load(&cli).unwrap();
        assert_eq!(ctx.config.generator.seed, 9);
        assert_eq!(ctx.config.simulation.seed, 9);
    }

    #[test]
    fn route_flag_parses_map_point() {
        let cli = parse(&["simulate", "--route", "40, 60"]);
        match cli.command {
            Command::Simulate { route, .. } => assert_eq!(route, Some(MapPoint::new(40.0, 60.0))),
            _ => panic!("expected simulate"),
        }
        assert!(Cli::try_parse_from(["demo", "simulate", "--route", "40"]).is_err());
    }

    #[test]
    fn out_of_range_start_hour_fails() {
        let cli = parse(&["simulate", "--ticks", "1", "--start-hour", "30"]);
        assert!(matches!(run(&cli), Err(DemoError::Median(MedianError::ConfigError { .. }))));
    }
}

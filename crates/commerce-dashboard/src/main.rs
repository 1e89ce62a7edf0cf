//! CLI entry point for the e-commerce analysis dashboard.

use anyhow::{Context, Result};
use clap::Parser;
use commerce_dashboard::{
    Controls, DashboardConfig, DashboardReport, ReportGenerator, shared_dataset, tui,
};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info, warn};

const DATA_DIR_ENV: &str = "DASHBOARD_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "Data";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "E-commerce Analysis Dashboard",
    long_about = "Answers five questions about a marketplace's order data: where customers \
                  and sellers are, when people buy, and what sells best.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  DASHBOARD_DATA_DIR    Data directory used when --data-dir is absent\n  \
                  RUST_LOG              Overrides --log-level\n\n\
                  EXAMPLES:\n  \
                  # Interactive dashboard\n  \
                  commerce-dashboard -d Data\n\n  \
                  # Text report with 15 cities and morning hours only\n  \
                  commerce-dashboard --report --top-cities 15 --hours 6,7,8,9,10,11\n\n  \
                  # JSON report\n  \
                  commerce-dashboard --json | jq '.sections[4]'"
)]
struct Args {
    /// Directory containing the six CSV files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Print all five sections as text instead of starting the dashboard
    #[arg(long)]
    report: bool,

    /// Output the report as JSON to stdout
    ///
    /// Disables all logging; only the JSON report is written.
    #[arg(long, conflicts_with = "report")]
    json: bool,

    /// Initial number of top customer cities (5 - 20)
    #[arg(long, default_value = "10")]
    top_cities: usize,

    /// Initial number of top seller cities (5 - 20)
    #[arg(long, default_value = "10")]
    top_seller_cities: usize,

    /// Initial number of top products (5 - 20)
    #[arg(long, default_value = "10")]
    top_products: usize,

    /// Initial number of top categories (5 - 20)
    #[arg(long, default_value = "10")]
    top_categories: usize,

    /// Initial hour selection, comma separated (default: all hours)
    #[arg(long, value_delimiter = ',')]
    hours: Option<Vec<u8>>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only show warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `silent` is true no subscriber is installed, so nothing but the
/// program's own output reaches the terminal.
fn init_logging(level: &str, quiet: bool, silent: bool) {
    if silent {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The interactive dashboard owns the terminal, so it runs without logs.
    let interactive = !args.report && !args.json;
    init_logging(&args.log_level, args.quiet, args.json || interactive);

    dotenv().ok();

    let config = build_config(&args)?;
    let data_dir = config.data_dir.display().to_string();
    debug!("Configuration: {:?}", config);

    info!("Loading dataset from: {}", data_dir);
    let data = shared_dataset(&config.dataset_paths())
        .with_context(|| format!("Failed to load dataset from '{}'", data_dir))?;

    for (name, join) in [
        ("product categories", data.product_join),
        ("line items", data.line_item_join),
    ] {
        if !join.preserves_cardinality() {
            warn!(
                "Join '{}' produced {} rows from {} input rows",
                name, join.output_rows, join.left_rows
            );
        }
    }

    let controls = Controls::from_config(&config)?;

    if interactive {
        return tui::run(data, controls).context("Dashboard terminal error");
    }

    let report = ReportGenerator::build(&data, &controls, &data_dir);
    if args.json {
        println!("{}", ReportGenerator::to_json(&report)?);
    } else {
        print_report(&report)?;
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<DashboardConfig> {
    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| env::var(DATA_DIR_ENV).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    let mut builder = DashboardConfig::builder()
        .data_dir(data_dir)
        .top_cities(args.top_cities)
        .top_seller_cities(args.top_seller_cities)
        .top_products(args.top_products)
        .top_categories(args.top_categories);

    if let Some(ref hours) = args.hours {
        builder = builder.hours(hours.clone());
    }

    Ok(builder.build()?)
}

/// Print the text report.
///
/// Uses `println!` intentionally: the report is the program's output, not a log.
fn print_report(report: &DashboardReport) -> Result<()> {
    println!("{}", ReportGenerator::to_text(report)?);

    let joins = &report.joins;
    println!("{}", "=".repeat(80));
    println!("DATA NOTES");
    println!("{}", "-".repeat(40));
    println!(
        "  Products without an English category: {}",
        report.dataset.uncategorized_products
    );
    println!(
        "  Products whose category has no translation row: {}",
        joins.product_categories.unmatched_left
    );
    println!(
        "  Line items without a known product: {}",
        joins.line_items.unmatched_left
    );
    if joins.line_items.duplicate_right_keys > 0 {
        println!(
            "  Duplicate product ids: {} (line items fanned out)",
            joins.line_items.duplicate_right_keys
        );
    }
    Ok(())
}

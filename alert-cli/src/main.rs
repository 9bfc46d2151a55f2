//! Alert Engine CLI Application
//!
//! Command-line front end for the alert-engine library:
//! - Replay TOML scenarios tick by tick (several files run in parallel)
//! - List the standard catalog grouped by category and priority
//! - Encode or decode compact binary wire frames

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod replay;
mod report;

use alert_engine::{catalog, AlertContext, Category, EventName, WireEvent};

/// Alert Engine - Replay event scenarios through the alert arbitration engine
#[derive(Parser, Debug)]
#[command(name = "alert-cli")]
#[command(about = "Replay event scenarios through the alert arbitration engine", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay one or more scenario files
    Replay {
        /// Scenario files (TOML)
        #[arg(value_name = "FILE", required = true)]
        scenarios: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the standard catalog by category and priority
    Catalog {
        /// Only list this category (camelCase, e.g. softDisable)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Encode event names into a hex wire frame
    Encode {
        /// Event names (camelCase, e.g. doorOpen)
        #[arg(value_name = "EVENT")]
        events: Vec<String>,
    },

    /// Decode a hex wire frame against the standard catalog
    Decode {
        /// Frame bytes as hex
        #[arg(value_name = "HEX")]
        frame: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::debug!("Alert CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using engine library v{}", alert_engine::VERSION);

    let catalog = Arc::new(catalog::standard().context("Standard catalog is invalid")?);

    match args.command {
        Command::Replay { scenarios, format } => replay_mode(&scenarios, format, catalog),
        Command::Catalog { category } => catalog_mode(category.as_deref(), &catalog),
        Command::Encode { events } => encode_mode(&events, &catalog),
        Command::Decode { frame } => decode_mode(&frame, catalog),
    }
}

/// Replay every scenario in parallel, print reports in argument order
fn replay_mode(
    paths: &[PathBuf],
    format: OutputFormat,
    catalog: Arc<alert_engine::EventCatalog>,
) -> Result<()> {
    let reports: Vec<Result<report::ScenarioReport>> = paths
        .par_iter()
        .map(|path| {
            let scenario = config::load_scenario(path)?;
            replay::run_scenario(&scenario, catalog.clone())
        })
        .collect();

    let mut failures = 0;
    for (path, result) in paths.iter().zip(reports) {
        match result {
            Ok(report) => match format {
                OutputFormat::Text => print!("{}", report.to_text()),
                OutputFormat::Json => println!("{}", report.to_json()?),
            },
            Err(e) => {
                failures += 1;
                log::error!("{:?}: {:#}", path, e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} scenarios failed", failures, paths.len());
    }
    Ok(())
}

fn catalog_mode(category: Option<&str>, catalog: &alert_engine::EventCatalog) -> Result<()> {
    let only = category
        .map(|name| name.parse::<Category>())
        .transpose()
        .context("Invalid --category")?;

    let listing = catalog.alerts_by_priority(&AlertContext::new());
    print!("{}", report::catalog_listing(&listing, only));
    Ok(())
}

fn encode_mode(events: &[String], catalog: &alert_engine::EventCatalog) -> Result<()> {
    let mut records = Vec::with_capacity(events.len());
    for name in events {
        let event: EventName = name.parse()?;
        records.push(WireEvent::from_mask(event.raw(), catalog.mask(event)));
    }
    records.sort_by_key(|r| r.event_id);
    records.dedup_by_key(|r| r.event_id);

    let frame = alert_engine::encode_frame(&records)?;
    println!("{}", to_hex(&frame));
    Ok(())
}

fn decode_mode(hex: &str, catalog: Arc<alert_engine::EventCatalog>) -> Result<()> {
    let bytes = from_hex(hex)?;
    let records = alert_engine::decode_frame(&bytes).context("Invalid wire frame")?;

    let mut codec = alert_engine::WireCodec::new(catalog.clone());
    for raw in codec.decode(&records) {
        let Some(event) = EventName::from_raw(raw) else { continue };
        let categories: Vec<&str> = Category::from_mask(catalog.mask(event))
            .into_iter()
            .map(Category::as_str)
            .collect();
        println!("{:>4} {:<28} {}", raw, event.as_str(), categories.join(", "));
    }
    for diagnostic in codec.take_diagnostics() {
        eprintln!("warning: {}", diagnostic);
    }
    Ok(())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(hex: &str) -> Result<Vec<u8>> {
    let hex: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    if !hex.is_ascii() || hex.len() % 2 != 0 {
        anyhow::bail!("Hex frame must be an even number of hex digits");
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .with_context(|| format!("Invalid hex byte at offset {}", i / 2))
        })
        .collect()
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

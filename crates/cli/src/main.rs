use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use trip_core::{Itinerary, ItineraryBuilder, ItineraryError};
use trip_observability::{init_tracing, RunMetrics};
use trip_publish::{publish, MarkerPatcher, PublishOutcome, DEFAULT_FALLBACK_FILE};
use trip_sheets::{read_workbook, ReadOptions};

#[derive(Debug, Parser)]
#[command(name = "itinerary")]
#[command(about = "Build trip itinerary data from per-city sheets")]
struct Cli {
    /// Directory of per-city CSV sheets, or a single CSV sheet.
    #[arg(long, env = "TRIP_SHEETS")]
    sheets: PathBuf,

    /// Index of the header row after skipped rows. When omitted, row 0 is
    /// tried first and row 1 if required columns are missing.
    #[arg(long)]
    header_row: Option<usize>,

    #[arg(long, default_value_t = 0)]
    skip_rows: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Embed the itinerary into an HTML page's `itineraryData` assignment.
    Inject {
        #[arg(long, env = "TRIP_HTML")]
        html: PathBuf,
        #[arg(long, env = "TRIP_FALLBACK", default_value = DEFAULT_FALLBACK_FILE)]
        fallback: PathBuf,
    },
    /// Print the itinerary JSON to stdout.
    Export {
        #[arg(long)]
        compact: bool,
    },
}

fn main() {
    init_tracing("trip_cli");
    let cli = Cli::parse();

    let code = exit_code(run(cli));
    if code != 0 {
        std::process::exit(code);
    }
}

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            error!(error = %format!("{err:#}"), "itinerary run failed");
            1
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let metrics = RunMetrics::new();
    let itinerary = build_with_header_retry(&cli.sheets, cli.header_row, cli.skip_rows, &metrics)?;

    match cli.command {
        Command::Inject { html, fallback } => {
            match publish(&html, &fallback, &itinerary, &MarkerPatcher)? {
                PublishOutcome::Patched { path } => {
                    println!("Successfully updated {}", path.display());
                }
                PublishOutcome::Fallback { path, reason } => {
                    metrics.inc_fallback_write();
                    warn!(reason = %reason, "document left unchanged");
                    println!(
                        "Could not update {}; itinerary saved to {}",
                        html.display(),
                        path.display()
                    );
                }
            }
        }
        Command::Export { compact } => {
            let json = if compact {
                serde_json::to_string(&itinerary)?
            } else {
                itinerary.to_pretty_json()?
            };
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    info!(metrics = %serde_json::to_string(&metrics.snapshot())?, "run complete");
    Ok(())
}

/// Without an explicit header row, a workbook whose first row is a title is
/// retried with the header one row further down.
fn build_with_header_retry(
    sheets: &Path,
    header_row: Option<usize>,
    skip_rows: usize,
    metrics: &RunMetrics,
) -> Result<Itinerary> {
    let options = ReadOptions {
        header_row: header_row.unwrap_or_default(),
        skip_rows,
    };

    match build(sheets, options, metrics) {
        Err(err)
            if header_row.is_none()
                && matches!(
                    err.downcast_ref::<ItineraryError>(),
                    Some(ItineraryError::MissingColumns { .. })
                ) =>
        {
            let retry = ReadOptions {
                header_row: options.header_row + 1,
                ..options
            };
            warn!(error = %err, header_row = retry.header_row, "retrying with next header row");
            build(sheets, retry, metrics)
        }
        result => result,
    }
}

fn build(sheets: &Path, options: ReadOptions, metrics: &RunMetrics) -> Result<Itinerary> {
    let workbook = read_workbook(sheets, options)
        .with_context(|| format!("failed loading sheets from {}", sheets.display()))?;

    let mut builder = ItineraryBuilder::new();
    for sheet in &workbook {
        builder.add_sheet(sheet)?;
    }

    metrics.add_sheets(builder.sheets_processed());
    metrics.add_rows(builder.rows_processed());
    metrics.add_unparsed_dates(builder.unparsed_dates().len());

    let itinerary = builder.finish();
    metrics.add_date_groups(itinerary.date_groups().len());
    info!(
        date_groups = itinerary.date_groups().len(),
        activities = itinerary.activity_count(),
        "itinerary built"
    );
    Ok(itinerary)
}

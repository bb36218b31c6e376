mod export;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use confcal_core::constants::{DEFAULT_OUTPUT_FILE, DEFAULT_SCHEDULE_URL};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "confcal")]
#[command(about = "Export a conference schedule page to an .ics calendar file")]
struct Cli {
    /// Schedule page to scrape
    #[arg(long, default_value = DEFAULT_SCHEDULE_URL)]
    url: String,

    /// Where to write the calendar
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    out: PathBuf,

    /// TOML file overriding year, time zone, site origin or markup selectors
    #[arg(long)]
    config: Option<PathBuf>,

    /// Conference year (day headings only show month and day)
    #[arg(long)]
    year: Option<i32>,

    /// Don't fetch each talk's page for its long description
    #[arg(long)]
    no_details: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    match export::run(cli.into()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {e:#}").red());
            ExitCode::FAILURE
        }
    }
}

/// Warnings go to stderr; `RUST_LOG` turns up the detail.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

impl From<Cli> for export::ExportArgs {
    fn from(cli: Cli) -> Self {
        export::ExportArgs {
            url: cli.url,
            out: cli.out,
            config: cli.config,
            year: cli.year,
            fetch_details: !cli.no_details,
        }
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use confcal_core::ics::{CalendarIdentity, write_ics};
use confcal_core::{HttpFetcher, ScheduleConfig, scrape_schedule};
use owo_colors::OwoColorize;

pub struct ExportArgs {
    pub url: String,
    pub out: PathBuf,
    pub config: Option<PathBuf>,
    pub year: Option<i32>,
    pub fetch_details: bool,
}

pub async fn run(args: ExportArgs) -> Result<()> {
    let config = load_config(&args)?;

    let fetcher = HttpFetcher::new().context("Could not set up HTTP client")?;
    let export = scrape_schedule(&fetcher, &config, &args.url).await?;

    write_ics(&args.out, &export.events, &CalendarIdentity::from(&config))
        .with_context(|| format!("Failed to write calendar to {}", args.out.display()))?;

    println!(
        "{}",
        format!("Wrote {} events to {}", export.events.len(), args.out.display()).green()
    );
    if !export.warnings.is_empty() {
        println!(
            "{}",
            format!("  {} schedule sections skipped, see warnings above", export.warnings.len())
                .yellow()
        );
    }

    Ok(())
}

fn load_config(args: &ExportArgs) -> Result<ScheduleConfig> {
    let mut config = match &args.config {
        Some(path) => ScheduleConfig::load(path)?,
        None => ScheduleConfig::default(),
    };

    if let Some(year) = args.year {
        config.year = year;
    }
    if !args.fetch_details {
        config.fetch_details = false;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(config: Option<PathBuf>) -> ExportArgs {
        ExportArgs {
            url: "https://example.com/schedule/".into(),
            out: PathBuf::from("out.ics"),
            config,
            year: Some(2030),
            fetch_details: false,
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = load_config(&args(None)).unwrap();
        assert_eq!(config.year, 2030);
        assert!(!config.fetch_details);
        assert_eq!(config.uid_domain, "djangocon-2025");
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("confcal-test-{}.toml", std::process::id()));
        std::fs::write(&path, "year = 2026\nuid_domain = \"conf-2026\"\n").unwrap();

        let config = load_config(&args(Some(path.clone())));
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();

        assert_eq!(config.year, 2030);
        assert_eq!(config.uid_domain, "conf-2026");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = load_config(&args(Some(PathBuf::from("/nonexistent/confcal.toml"))));
        assert!(result.is_err());
    }
}

//! Walking a schedule page: day sections → time blocks → session entries.

mod day;
mod session;
mod time_block;

pub use day::{DayHeading, parse_label_and_date};
pub use session::scrape_session;
pub use time_block::{parse_time_range, parse_timestamp};

use chrono::{DateTime, FixedOffset};

use crate::config::ScheduleConfig;
use crate::error::{ConfcalError, ConfcalResult, SkipReason};
use crate::event::Event;
use crate::fetch::{FetchText, fetch_talk_description};
use crate::html::{HtmlNode, ScrapedDocument};
use crate::text::normalize_str;

/// Navigation links share the day heading markup; their text contains this word.
const NAVIGATION_MARKER: &str = "Schedule";

/// Events scraped from one page, in page order, plus the problems worth
/// reporting that were skipped over.
#[derive(Debug, Default)]
pub struct ScheduleExport {
    pub events: Vec<Event>,
    pub warnings: Vec<SkipReason>,
}

impl ScheduleExport {
    fn skipped(&mut self, reason: SkipReason) {
        if reason.is_warning() {
            tracing::warn!("{}", reason);
            self.warnings.push(reason);
        } else {
            tracing::debug!("Skipping: {}", reason);
        }
    }
}

/// Fetch a schedule page and extract its events.
///
/// Only a failure to fetch the page itself is an error; problems inside the
/// page are skipped and reported in [`ScheduleExport::warnings`].
pub async fn scrape_schedule<F: FetchText>(
    fetcher: &F,
    config: &ScheduleConfig,
    url: &str,
) -> ConfcalResult<ScheduleExport> {
    let scraper = ScheduleScraper::new(config, fetcher)?;

    tracing::info!("Fetching schedule from {}", url);
    let html = fetcher
        .fetch_text(url, config.page_timeout())
        .await
        .map_err(|source| ConfcalError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let doc = ScrapedDocument::parse(&html);
    Ok(scraper.extract(&doc.root()).await)
}

/// Extracts events from an already fetched page, fetching talk pages as it goes.
pub struct ScheduleScraper<'a, F> {
    config: &'a ScheduleConfig,
    fetcher: &'a F,
}

impl<'a, F: FetchText> ScheduleScraper<'a, F> {
    pub fn new(config: &'a ScheduleConfig, fetcher: &'a F) -> ConfcalResult<Self> {
        config.validate()?;
        Ok(ScheduleScraper { config, fetcher })
    }

    pub async fn extract<N: HtmlNode>(&self, root: &N) -> ScheduleExport {
        let mut export = ScheduleExport::default();

        for heading in root.find_all(&self.config.markup.day_heading) {
            if let Err(reason) = self.extract_day(&heading, &mut export).await {
                export.skipped(reason);
            }
        }

        tracing::info!(
            "Extracted {} events ({} warnings)",
            export.events.len(),
            export.warnings.len()
        );
        export
    }

    async fn extract_day<N: HtmlNode>(
        &self,
        heading: &N,
        export: &mut ScheduleExport,
    ) -> Result<(), SkipReason> {
        let markup = &self.config.markup;

        let anchor = heading.find("a").ok_or(SkipReason::NoAnchor)?;
        let day_text = normalize_str(&anchor.text());
        if day_text.is_empty() {
            return Err(SkipReason::EmptyAnchor);
        }
        if day_text.contains(NAVIGATION_MARKER) {
            return Err(SkipReason::NavigationLink(day_text));
        }

        let day = parse_label_and_date(&day_text, self.config.year)?;

        let container = heading
            .closest(&markup.day_container)
            .ok_or_else(|| SkipReason::MissingDayContainer {
                heading: day_text.clone(),
            })?;

        tracing::debug!("Day '{}' ({})", day.label, day.date);

        for block in container.find_all(&markup.time_block) {
            match self.extract_time_block(&block).await {
                Ok(events) => export.events.extend(events),
                Err(reason) => export.skipped(reason),
            }
        }

        Ok(())
    }

    /// Events of one time block, in document order.
    pub async fn extract_time_block<N: HtmlNode>(
        &self,
        block: &N,
    ) -> Result<Vec<Event>, SkipReason> {
        let markup = &self.config.markup;
        let (start, end) = parse_time_range(block, &markup.time_heading, self.config.timezone)?;

        let mut events = Vec::new();
        for section in block.find_all(&markup.session) {
            if let Some(event) = self.extract_session(&section, start, end).await {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Build the event for one session entry, fetching its talk page if it
    /// links to one.
    pub async fn extract_session<N: HtmlNode>(
        &self,
        section: &N,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Option<Event> {
        let mut details =
            scrape_session(section, &self.config.markup, &self.config.site_origin)?;

        if self.config.fetch_details {
            details.talk_description = fetch_talk_description(
                self.fetcher,
                &details.url,
                self.config.detail_timeout(),
                &self.config.markup.prose,
            )
            .await;
        }

        Event::new(details, start, end)
    }
}

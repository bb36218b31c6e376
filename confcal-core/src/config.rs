//! Export configuration.
//!
//! Everything that ties confcal to one particular conference (its year, its
//! time zone, where the site lives, how its markup is laid out) lives here,
//! so another event can be exported by writing a small TOML file:
//!
//! ```toml
//! year = 2026
//! timezone = "Europe/Amsterdam"
//! site_origin = "https://2026.example.org/"
//!
//! [markup]
//! day_container = "section.day"
//! ```

use std::path::Path;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::constants::{
    DEFAULT_CONFERENCE_YEAR, DEFAULT_PRODUCT_ID, DEFAULT_SITE_ORIGIN, DEFAULT_TIMEZONE,
    DEFAULT_UID_DOMAIN, DETAIL_TIMEOUT_SECS, PAGE_TIMEOUT_SECS,
};
use crate::error::{ConfcalError, ConfcalResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Year appended to day headings, which only show month and day.
    pub year: i32,

    /// Conference time zone, used for timestamps that carry no offset.
    #[serde(deserialize_with = "deserialize_tz")]
    pub timezone: Tz,

    /// Origin that relative talk links are resolved against.
    pub site_origin: Url,

    pub product_id: String,

    /// Suffix of every generated UID (`<uuid>@<uid_domain>`).
    pub uid_domain: String,

    pub page_timeout_secs: u64,
    pub detail_timeout_secs: u64,

    /// Fetch each talk's page for its long-form description.
    pub fetch_details: bool,

    pub markup: Markup,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            year: DEFAULT_CONFERENCE_YEAR,
            timezone: DEFAULT_TIMEZONE,
            site_origin: Url::parse(DEFAULT_SITE_ORIGIN)
                .expect("default site origin is a valid URL"),
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            page_timeout_secs: PAGE_TIMEOUT_SECS,
            detail_timeout_secs: DETAIL_TIMEOUT_SECS,
            fetch_details: true,
            markup: Markup::default(),
        }
    }
}

/// CSS selectors describing the schedule page and talk pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Markup {
    pub day_heading: String,
    pub day_container: String,
    pub time_block: String,
    pub time_heading: String,
    pub session: String,
    pub room: String,
    pub title: String,
    pub presenter_block: String,
    pub presenter_name: String,
    pub audience_badge: String,
    /// Container following the "About this session" heading on a talk page.
    pub prose: String,
}

impl Default for Markup {
    fn default() -> Self {
        Markup {
            day_heading: "h2".into(),
            day_container: "div.relative".into(),
            time_block: r#"div[class="flex flex-wrap gap-4 lg:gap-8"]"#.into(),
            time_heading: "h3".into(),
            session: "section".into(),
            room: "p.text-sm".into(),
            title: "h4".into(),
            presenter_block: r#"div[class="pt-6 mt-auto"]"#.into(),
            presenter_name: "h6".into(),
            audience_badge:
                r#"span[class="px-2 py-[.125rem] text-sm font-bold text-white bg-black rounded"]"#
                    .into(),
            prose: "div.prose".into(),
        }
    }
}

impl Markup {
    fn selectors(&self) -> [(&'static str, &str); 11] {
        [
            ("day_heading", &self.day_heading),
            ("day_container", &self.day_container),
            ("time_block", &self.time_block),
            ("time_heading", &self.time_heading),
            ("session", &self.session),
            ("room", &self.room),
            ("title", &self.title),
            ("presenter_block", &self.presenter_block),
            ("presenter_name", &self.presenter_name),
            ("audience_badge", &self.audience_badge),
            ("prose", &self.prose),
        ]
    }
}

impl ScheduleConfig {
    /// Load a config file, falling back to defaults for missing keys.
    pub fn load(path: &Path) -> ConfcalResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfcalError::Config(format!("Could not read {}: {e}", path.display()))
        })?;

        let config: ScheduleConfig = toml::from_str(&contents).map_err(|e| {
            ConfcalError::Config(format!("Could not parse {}: {e}", path.display()))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check that links can be resolved against the origin and every selector parses.
    pub fn validate(&self) -> ConfcalResult<()> {
        if self.site_origin.cannot_be_a_base() {
            return Err(ConfcalError::Config(format!(
                "site_origin '{}' cannot be used as a base URL",
                self.site_origin
            )));
        }

        for (name, selector) in self.markup.selectors() {
            scraper::Selector::parse(selector).map_err(|e| {
                ConfcalError::Config(format!("Invalid selector for markup.{name} ('{selector}'): {e}"))
            })?;
        }

        Ok(())
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn detail_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_timeout_secs)
    }
}

fn deserialize_tz<'de, D>(deserializer: D) -> Result<Tz, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse::<Tz>()
        .map_err(|e| serde::de::Error::custom(format!("unknown time zone '{name}': {e}")))
}

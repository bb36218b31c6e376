//! Defaults for the conference site confcal was first written for.

pub const DEFAULT_SCHEDULE_URL: &str = "https://2025.djangocon.us/schedule/";
pub const DEFAULT_OUTPUT_FILE: &str = "djangocon-2025.ics";
pub const DEFAULT_SITE_ORIGIN: &str = "https://2025.djangocon.us/";
pub const DEFAULT_CONFERENCE_YEAR: i32 = 2025;
pub const DEFAULT_TIMEZONE: chrono_tz::Tz = chrono_tz::America::Chicago;
pub const DEFAULT_PRODUCT_ID: &str = "-//Custom//DjangoCon US 2025 Export//EN";
pub const DEFAULT_UID_DOMAIN: &str = "djangocon-2025";

pub const PAGE_TIMEOUT_SECS: u64 = 30;
pub const DETAIL_TIMEOUT_SECS: u64 = 10;

/// Maximum length of one physical ics line, in bytes (RFC 5545 3.1).
pub const LINE_FOLD_LIMIT: usize = 75;

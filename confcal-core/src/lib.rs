//! Core of confcal: scrape a conference schedule page into events and write
//! them out as an iCalendar file.
//!
//! - `schedule` walks the page (day sections, time blocks, session entries)
//! - `fetch` gets pages, including each talk's "About this session" text
//! - `ics` renders the events with RFC 5545 escaping and line folding

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod fetch;
pub mod html;
pub mod ics;
pub mod schedule;
pub mod text;

pub use config::{Markup, ScheduleConfig};
pub use error::{ConfcalError, ConfcalResult, FetchError, SkipReason};
pub use event::{Event, SessionDetails};
pub use fetch::{FetchText, HttpFetcher};
pub use schedule::{ScheduleExport, scrape_schedule};

//! iCalendar (RFC 5545) output.

mod format;
mod generate;

pub use format::{escape_text, fold_line, format_utc};
pub use generate::{CalendarIdentity, generate_ics, render_ics, write_ics};

//! RFC 5545 text escaping, line folding and UTC timestamps.

use chrono::{DateTime, TimeZone, Utc};

use crate::constants::LINE_FOLD_LIMIT;

pub const CRLF: &str = "\r\n";

/// Escape a TEXT value (RFC 5545 3.3.11). Backslashes go first so the
/// escapes added afterwards are not doubled.
pub fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(';', "\\;")
        .replace('\n', "\\n")
}

/// Fold a content line longer than [`LINE_FOLD_LIMIT`] bytes into CRLF +
/// space continuation lines, never splitting a UTF-8 sequence.
pub fn fold_line(line: &str) -> String {
    fold_line_at(line, LINE_FOLD_LIMIT)
}

fn fold_line_at(line: &str, limit: usize) -> String {
    let mut physical = Vec::new();
    let mut rest = line.to_string();

    while rest.len() > limit {
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        // Continuation lines start with a space, so at least two bytes must go.
        if cut <= 1 {
            break;
        }
        physical.push(rest[..cut].to_string());
        rest = format!(" {}", &rest[cut..]);
    }
    physical.push(rest);

    physical.join(CRLF)
}

/// `YYYYMMDDTHHMMSSZ` in UTC.
pub fn format_utc<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

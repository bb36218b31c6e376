//! Day heading parsing ("Talks: Day 1 / Monday, Sep 8").

use chrono::NaiveDate;

use crate::error::SkipReason;

/// A day section's category label and calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayHeading {
    pub label: String,
    pub date: NaiveDate,
}

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Split a heading into `<label> / <day>` and parse the day in `year`.
///
/// A heading without the separator is `HeadingFormat`; a day text that holds
/// no recognisable month and day is `UnparsableDate`. A year already written in
/// the day text wins over `year`.
pub fn parse_label_and_date(heading: &str, year: i32) -> Result<DayHeading, SkipReason> {
    let (label, day_text) = heading
        .split_once('/')
        .map(|(label, day)| (label.trim(), day.trim()))
        .filter(|(label, day)| !label.is_empty() && !day.is_empty())
        .ok_or_else(|| SkipReason::HeadingFormat(heading.to_string()))?;

    let date = parse_fuzzy_date(&format!("{day_text}, {year}")).ok_or_else(|| {
        SkipReason::UnparsableDate {
            text: day_text.to_string(),
        }
    })?;

    Ok(DayHeading {
        label: label.to_string(),
        date,
    })
}

/// Pick a month name, a day of month and a four digit year out of free text.
/// Weekday names and any other words are ignored.
fn parse_fuzzy_date(text: &str) -> Option<NaiveDate> {
    let mut month = None;
    let mut day = None;
    let mut year = None;

    for token in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let token = token.to_lowercase();

        if let Some(m) = month_number(&token) {
            month.get_or_insert(m);
            continue;
        }

        let digits = strip_ordinal(&token);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        match digits.len() {
            1 | 2 => {
                day.get_or_insert(digits.parse::<u32>().ok()?);
            }
            4 => {
                year.get_or_insert(digits.parse::<i32>().ok()?);
            }
            _ => {}
        }
    }

    NaiveDate::from_ymd_opt(year?, month?, day?)
}

/// Month number for a full or abbreviated (at least three letters) month name.
fn month_number(token: &str) -> Option<u32> {
    if token.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|name| name.starts_with(token))
        .map(|i| i as u32 + 1)
}

/// "8th" -> "8", "22nd" -> "22". Leaves anything else untouched.
fn strip_ordinal(token: &str) -> &str {
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(stripped) = token.strip_suffix(suffix) {
            if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
                return stripped;
            }
        }
    }
    token
}

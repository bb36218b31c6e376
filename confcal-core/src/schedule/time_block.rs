//! Start/end instants of a time block.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::error::SkipReason;
use crate::html::HtmlNode;

/// Read the two `<time datetime="...">` elements of a time block's heading.
pub fn parse_time_range<N: HtmlNode>(
    block: &N,
    heading_selector: &str,
    tz: Tz,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), SkipReason> {
    let heading = block.find(heading_selector).ok_or(SkipReason::NoTimeHeading)?;

    let times = heading.find_all("time");
    let [start, end] = times.as_slice() else {
        return Err(SkipReason::TimestampCount { found: times.len() });
    };

    let start = start.attr("datetime").ok_or(SkipReason::MissingTimestamp)?;
    let end = end.attr("datetime").ok_or(SkipReason::MissingTimestamp)?;

    Ok((parse_timestamp(&start, tz)?, parse_timestamp(&end, tz)?))
}

/// Parse an ISO 8601 timestamp. One without an offset is taken to be local
/// time in `tz`; a bare date is rejected.
pub fn parse_timestamp(value: &str, tz: Tz) -> Result<DateTime<FixedOffset>, SkipReason> {
    let value = value.trim();
    let unparsable = || SkipReason::UnparsableTimestamp {
        value: value.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }

    for format in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset())
                .ok_or_else(unparsable);
        }
    }

    Err(unparsable())
}

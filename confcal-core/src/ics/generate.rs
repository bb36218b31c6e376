//! Calendar generation.

use std::path::Path;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::format::{CRLF, escape_text, fold_line, format_utc};
use crate::config::ScheduleConfig;
use crate::error::ConfcalResult;
use crate::event::Event;

/// Identity stamped on the generated calendar.
#[derive(Debug, Clone)]
pub struct CalendarIdentity {
    /// PRODID value.
    pub product_id: String,
    /// UIDs are `<uuid>@<uid_domain>`.
    pub uid_domain: String,
}

impl From<&ScheduleConfig> for CalendarIdentity {
    fn from(config: &ScheduleConfig) -> Self {
        CalendarIdentity {
            product_id: config.product_id.clone(),
            uid_domain: config.uid_domain.clone(),
        }
    }
}

/// Generate a complete calendar for `events`, stamped with the current time.
pub fn generate_ics(events: &[Event], identity: &CalendarIdentity) -> String {
    render_ics(events, identity, Utc::now())
}

/// Generate the calendar for `events` and write it to `path` as UTF-8.
pub fn write_ics(
    path: &Path,
    events: &[Event],
    identity: &CalendarIdentity,
) -> ConfcalResult<()> {
    std::fs::write(path, generate_ics(events, identity))?;
    tracing::info!("Wrote {} events to {}", events.len(), path.display());
    Ok(())
}

/// Generate a complete calendar with an explicit DTSTAMP.
///
/// Lines are CRLF separated with no terminator after `END:VCALENDAR`.
pub fn render_ics(events: &[Event], identity: &CalendarIdentity, dtstamp: DateTime<Utc>) -> String {
    let dtstamp = format_utc(&dtstamp);

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        format!("PRODID:{}", identity.product_id),
        "VERSION:2.0".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    for event in events {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}@{}", Uuid::new_v4(), identity.uid_domain));
        lines.push(format!("DTSTAMP:{dtstamp}"));
        lines.push(format!("DTSTART:{}", format_utc(&event.start())));
        lines.push(format!("DTEND:{}", format_utc(&event.end())));
        lines.push(text_property("SUMMARY", event.title()));

        // Empty LOCATION/DESCRIPTION are left out rather than written blank
        if !event.room().is_empty() {
            lines.push(text_property("LOCATION", event.room()));
        }
        if !event.description().is_empty() {
            lines.push(text_property("DESCRIPTION", event.description()));
        }

        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    lines.join(CRLF)
}

fn text_property(name: &str, value: &str) -> String {
    fold_line(&format!("{}:{}", name, escape_text(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfcalError;
    use crate::event::SessionDetails;
    use chrono::{FixedOffset, TimeZone};

    fn identity() -> CalendarIdentity {
        CalendarIdentity::from(&ScheduleConfig::default())
    }

    fn make_event(details: SessionDetails) -> Event {
        let cdt = FixedOffset::west_opt(5 * 3600).unwrap();
        Event::new(
            details,
            cdt.with_ymd_and_hms(2025, 9, 8, 9, 0, 0).unwrap(),
            cdt.with_ymd_and_hms(2025, 9, 8, 10, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_calendar_structure() {
        let ics = render_ics(&[], &identity(), stamp());
        assert_eq!(
            ics,
            "BEGIN:VCALENDAR\r\n\
             PRODID:-//Custom//DjangoCon US 2025 Export//EN\r\n\
             VERSION:2.0\r\n\
             CALSCALE:GREGORIAN\r\n\
             METHOD:PUBLISH\r\n\
             END:VCALENDAR"
        );
    }

    #[test]
    fn test_event_block() {
        let event = make_event(SessionDetails {
            title: "Opening Keynote".into(),
            room: "Main Ballroom".into(),
            presenters: vec!["John Doe".into()],
            ..SessionDetails::default()
        });

        let ics = render_ics(&[event], &identity(), stamp());
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert_eq!(lines[5], "BEGIN:VEVENT");
        assert!(lines[6].starts_with("UID:"));
        assert!(lines[6].ends_with("@djangocon-2025"));
        assert_eq!(lines[7], "DTSTAMP:20250801T120000Z");
        assert_eq!(lines[8], "DTSTART:20250908T140000Z");
        assert_eq!(lines[9], "DTEND:20250908T150000Z");
        assert_eq!(lines[10], "SUMMARY:Opening Keynote");
        assert_eq!(lines[11], "LOCATION:Main Ballroom");
        assert_eq!(
            lines[12],
            "DESCRIPTION:Presented by: John Doe\\nLocation: Main Ballroom"
        );
        assert_eq!(lines[13], "END:VEVENT");
        assert_eq!(lines[14], "END:VCALENDAR");
        assert!(!ics.ends_with("\r\n"));
    }

    #[test]
    fn test_empty_location_and_description_are_omitted() {
        let event = make_event(SessionDetails {
            title: "Minimal Event".into(),
            ..SessionDetails::default()
        });

        let ics = render_ics(&[event], &identity(), stamp());

        assert!(!ics.contains("LOCATION"), "ICS:\n{}", ics);
        assert!(!ics.contains("DESCRIPTION"), "ICS:\n{}", ics);
        assert!(ics.contains("SUMMARY:Minimal Event\r\nEND:VEVENT"));
    }

    #[test]
    fn test_summary_is_escaped_and_folded() {
        let title = "Databases, migrations; and backslashes \\ in a title long enough to need folding";
        let event = make_event(SessionDetails {
            title: title.into(),
            ..SessionDetails::default()
        });

        let ics = render_ics(&[event], &identity(), stamp());

        for line in ics.split("\r\n") {
            assert!(line.len() <= 75, "line too long: {:?}", line);
        }
        let unfolded = ics.replace("\r\n ", "");
        assert!(unfolded.contains(
            "SUMMARY:Databases\\, migrations\\; and backslashes \\\\ in a title long enough to need folding"
        ));
    }

    #[test]
    fn test_uids_are_unique_and_use_configured_domain() {
        let events: Vec<Event> = (0..3)
            .map(|i| {
                make_event(SessionDetails {
                    title: format!("Talk {i}"),
                    ..SessionDetails::default()
                })
            })
            .collect();
        let identity = CalendarIdentity {
            product_id: "-//Example//Conf 2026//EN".into(),
            uid_domain: "conf-2026".into(),
        };

        let ics = render_ics(&events, &identity, stamp());
        let uids: Vec<&str> = ics.lines().filter(|l| l.starts_with("UID:")).collect();

        assert!(ics.contains("PRODID:-//Example//Conf 2026//EN"));
        assert_eq!(uids.len(), 3);
        assert!(uids.iter().all(|u| u.ends_with("@conf-2026")));
        assert_ne!(uids[0], uids[1]);
        assert_ne!(uids[1], uids[2]);
    }

    #[test]
    fn test_generate_ics_uses_current_time() {
        let event = make_event(SessionDetails {
            title: "Now".into(),
            ..SessionDetails::default()
        });
        let before = format_utc(&Utc::now());

        let ics = generate_ics(&[event], &identity());

        let dtstamp = ics
            .lines()
            .find_map(|l| l.strip_prefix("DTSTAMP:"))
            .unwrap();
        assert_eq!(dtstamp.len(), 16);
        assert!(dtstamp.ends_with('Z'));
        assert!(dtstamp >= before.as_str());
    }

    #[test]
    fn test_write_ics_writes_file() {
        let path = std::env::temp_dir().join(format!("confcal-write-{}.ics", std::process::id()));
        let event = make_event(SessionDetails {
            title: "Written".into(),
            ..SessionDetails::default()
        });

        let result = write_ics(&path, &[event], &identity());
        let contents = std::fs::read_to_string(&path);
        let _ = std::fs::remove_file(&path);

        assert!(result.is_ok());
        let contents = contents.unwrap();
        assert!(contents.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(contents.contains("SUMMARY:Written\r\n"));
        assert!(contents.ends_with("END:VCALENDAR"));
    }

    #[test]
    fn test_write_ics_reports_io_error() {
        let path = std::env::temp_dir()
            .join(format!("confcal-missing-{}", std::process::id()))
            .join("out.ics");

        let err = write_ics(&path, &[], &identity()).unwrap_err();

        assert!(matches!(err, ConfcalError::Io(_)), "got {err:?}");
        assert!(err.to_string().starts_with("IO error:"));
    }
}

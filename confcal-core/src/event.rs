//! Event record produced by extraction and consumed by the ics writer.

use chrono::{DateTime, FixedOffset};

/// Fields scraped for one session, before they are frozen into an [`Event`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDetails {
    pub title: String,
    pub room: String,
    pub url: String,
    pub presenters: Vec<String>,
    /// Already formatted, e.g. "Audience level: Intermediate". Empty if none.
    pub audience_level: String,
    pub talk_description: String,
}

/// One calendar entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    title: String,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    room: String,
    url: String,
    talk_description: String,
    description: String,
}

impl Event {
    /// Build an event, composing its description. Returns `None` when the
    /// title is empty.
    pub fn new(
        details: SessionDetails,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Option<Self> {
        if details.title.is_empty() {
            return None;
        }

        let description = compose_description(&details);

        Some(Event {
            title: details.title,
            start,
            end,
            room: details.room,
            url: details.url,
            talk_description: details.talk_description,
            description,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn talk_description(&self) -> &str {
        &self.talk_description
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Presenters, audience level and location one per line, then the talk link
/// and the long-form description as blank-line separated blocks.
fn compose_description(details: &SessionDetails) -> String {
    let mut lines = Vec::new();
    if !details.presenters.is_empty() {
        lines.push(format!("Presented by: {}", details.presenters.join(", ")));
    }
    if !details.audience_level.is_empty() {
        lines.push(details.audience_level.clone());
    }
    if !details.room.is_empty() {
        lines.push(format!("Location: {}", details.room));
    }

    let mut blocks = Vec::new();
    if !lines.is_empty() {
        blocks.push(lines.join("\n"));
    }
    if !details.url.is_empty() {
        blocks.push(format!("More info: {}", details.url));
    }
    if !details.talk_description.is_empty() {
        blocks.push(details.talk_description.clone());
    }

    blocks.join("\n\n")
}

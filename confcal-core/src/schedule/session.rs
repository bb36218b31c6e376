//! Fields of a single session entry.

use url::Url;

use crate::config::Markup;
use crate::event::SessionDetails;
use crate::html::HtmlNode;
use crate::text::normalize_str;

/// Audience level shown on sessions meant for everyone; says nothing useful.
const UNIVERSAL_AUDIENCE: &str = "All";

/// Read everything but the long-form description from a session entry.
/// `None` when the entry has no title.
pub fn scrape_session<N: HtmlNode>(
    section: &N,
    markup: &Markup,
    origin: &Url,
) -> Option<SessionDetails> {
    let room = text_of(section.find(&markup.room));

    let heading = section.find(&markup.title)?;
    let link = heading.find("a");
    let title = match &link {
        Some(link) => normalize_str(&link.text()),
        None => normalize_str(&heading.text()),
    };
    if title.is_empty() {
        return None;
    }

    let url = link
        .and_then(|link| link.attr("href"))
        .and_then(|href| resolve_relative(origin, &href))
        .unwrap_or_default();

    let presenters = section
        .find(&markup.presenter_block)
        .map(|block| {
            block
                .find_all(&markup.presenter_name)
                .iter()
                .map(|name| normalize_str(&name.text()))
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let audience = text_of(section.find(&markup.audience_badge));
    let audience_level = if audience.is_empty() || audience == UNIVERSAL_AUDIENCE {
        String::new()
    } else {
        format!("Audience level: {audience}")
    };

    Some(SessionDetails {
        title,
        room,
        url,
        presenters,
        audience_level,
        talk_description: String::new(),
    })
}

fn text_of<N: HtmlNode>(node: Option<N>) -> String {
    node.map(|n| normalize_str(&n.text())).unwrap_or_default()
}

/// Resolve a relative link against the site origin. Absolute links are not
/// talk pages on this site and resolve to nothing.
fn resolve_relative(origin: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match Url::parse(href) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            origin.join(href).ok().map(|url| url.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::ScrapedDocument;

    fn scrape(html: &str) -> Option<SessionDetails> {
        let doc = ScrapedDocument::parse(html);
        let section = doc.root().find("section").unwrap();
        let origin = Url::parse("https://2025.djangocon.us/").unwrap();
        scrape_session(&section, &Markup::default(), &origin)
    }

    #[test]
    fn test_scrape_complete_session() {
        let details = scrape(
            r#"
            <section>
                <header><div><p class="text-sm">Main Ballroom</p></div></header>
                <h4><a href="/talks/opening-keynote/">Opening   Keynote</a></h4>
                <div class="pt-6 mt-auto">
                    <ul>
                        <li><h6>John Doe</h6></li>
                        <li><h6> Jane
                            Smith </h6></li>
                    </ul>
                </div>
                <span class="px-2 py-[.125rem] text-sm font-bold text-white bg-black rounded">Intermediate</span>
            </section>"#,
        )
        .unwrap();

        assert_eq!(details.title, "Opening Keynote");
        assert_eq!(details.room, "Main Ballroom");
        assert_eq!(details.url, "https://2025.djangocon.us/talks/opening-keynote/");
        assert_eq!(details.presenters, vec!["John Doe", "Jane Smith"]);
        assert_eq!(details.audience_level, "Audience level: Intermediate");
        assert_eq!(details.talk_description, "");
    }

    #[test]
    fn test_session_without_title_heading_is_dropped() {
        assert!(
            scrape(r#"<section><header><div><p class="text-sm">Main Ballroom</p></div></header></section>"#)
                .is_none()
        );
    }

    #[test]
    fn test_session_with_empty_title_is_dropped() {
        assert!(scrape("<section><h4>  </h4></section>").is_none());
        assert!(scrape(r#"<section><h4><a href="/talks/x/"> </a></h4></section>"#).is_none());
    }

    #[test]
    fn test_heading_without_link() {
        let details = scrape("<section><h4>Opening Keynote</h4></section>").unwrap();
        assert_eq!(details.title, "Opening Keynote");
        assert_eq!(details.url, "");
        assert_eq!(details.room, "");
        assert!(details.presenters.is_empty());
    }

    #[test]
    fn test_universal_audience_is_suppressed() {
        let details = scrape(
            r#"<section><h4>Opening Keynote</h4>
            <span class="px-2 py-[.125rem] text-sm font-bold text-white bg-black rounded">All</span>
            </section>"#,
        )
        .unwrap();
        assert_eq!(details.audience_level, "");

        let details = scrape(
            r#"<section><h4>Deep Dive</h4>
            <span class="px-2 py-[.125rem] text-sm font-bold text-white bg-black rounded">Advanced</span>
            </section>"#,
        )
        .unwrap();
        assert_eq!(details.audience_level, "Audience level: Advanced");
    }

    #[test]
    fn test_presenter_names_outside_block_are_ignored() {
        let details = scrape(
            r#"<section><h4>Panel</h4><h6>Not a presenter</h6>
            <div class="pt-6 mt-auto"><h6>Ada</h6><h6></h6></div></section>"#,
        )
        .unwrap();
        assert_eq!(details.presenters, vec!["Ada"]);
    }

    #[test]
    fn test_link_resolution() {
        let origin = Url::parse("https://2025.djangocon.us/").unwrap();
        assert_eq!(
            resolve_relative(&origin, "/talks/a/").as_deref(),
            Some("https://2025.djangocon.us/talks/a/")
        );
        assert_eq!(
            resolve_relative(&origin, "talks/b/").as_deref(),
            Some("https://2025.djangocon.us/talks/b/")
        );
        assert_eq!(resolve_relative(&origin, "https://elsewhere.example/"), None);
        assert_eq!(resolve_relative(&origin, ""), None);
    }
}

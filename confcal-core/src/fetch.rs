//! Page fetching and talk detail pages.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::FetchError;
use crate::html::{HtmlNode, ScrapedDocument};
use crate::text::normalize_str;

const ABOUT_HEADING: &str = "About this session";
const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";

/// Something that can turn a URL into page text.
pub trait FetchText {
    fn fetch_text(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, FetchError>>;
}

/// Fetches pages over HTTP(S). Non-success statuses are errors; nothing is retried.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("confcal/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl FetchText for HttpFetcher {
    async fn fetch_text(&self, url: &str, limit: Duration) -> Result<String, FetchError> {
        let request = async {
            let response = self.client.get(url).send().await?.error_for_status()?;
            Ok::<_, reqwest::Error>(response.text().await?)
        };

        let body = timeout(limit, request)
            .await
            .map_err(|_| FetchError::Timeout(limit.as_secs()))??;

        Ok(body)
    }
}

/// Fetch a talk page and return its "About this session" paragraphs,
/// separated by blank lines.
///
/// Best effort: an empty URL, a failed fetch or a page without the section
/// all give an empty string.
pub async fn fetch_talk_description<F: FetchText>(
    fetcher: &F,
    url: &str,
    limit: Duration,
    prose_selector: &str,
) -> String {
    if url.is_empty() {
        return String::new();
    }

    match fetcher.fetch_text(url, limit).await {
        Ok(html) => {
            let doc = ScrapedDocument::parse(&html);
            about_section_text(&doc.root(), prose_selector)
        }
        Err(e) => {
            tracing::debug!("Could not fetch talk page {}: {}", url, e);
            String::new()
        }
    }
}

fn about_section_text<N: HtmlNode>(root: &N, prose_selector: &str) -> String {
    let Some(heading) = root
        .find_all(HEADINGS)
        .into_iter()
        .find(|h| normalize_str(&h.text()) == ABOUT_HEADING)
    else {
        return String::new();
    };

    let Some(prose) = heading.find_next(prose_selector) else {
        return String::new();
    };

    prose
        .find_all("p")
        .iter()
        .map(|p| normalize_str(&p.text()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

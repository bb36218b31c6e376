//! Minimal HTML query interface used by the extractor.
//!
//! Extraction code only needs "find descendants matching a CSS selector" and a
//! few neighbours of that, so it is written against [`HtmlNode`]. The
//! production implementation wraps the `scraper` crate.

use scraper::{ElementRef, Html, Selector};

/// An element that can be queried with CSS selectors.
pub trait HtmlNode: Sized {
    /// First descendant matching `selector`.
    fn find(&self, selector: &str) -> Option<Self>;

    /// All descendants matching `selector`, in document order.
    fn find_all(&self, selector: &str) -> Vec<Self>;

    /// Nearest ancestor matching `selector`.
    fn closest(&self, selector: &str) -> Option<Self>;

    /// First element after this one in document order matching `selector`.
    fn find_next(&self, selector: &str) -> Option<Self>;

    fn attr(&self, name: &str) -> Option<String>;

    /// Text of all descendant text nodes, joined with single spaces.
    fn text(&self) -> String;
}

/// A parsed HTML page.
pub struct ScrapedDocument {
    html: Html,
}

impl ScrapedDocument {
    pub fn parse(content: &str) -> Self {
        ScrapedDocument {
            html: Html::parse_document(content),
        }
    }

    pub fn root(&self) -> ScrapedNode<'_> {
        ScrapedNode(self.html.root_element())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScrapedNode<'a>(ElementRef<'a>);

fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Ignoring invalid selector '{}': {}", selector, e);
            None
        }
    }
}

impl<'a> HtmlNode for ScrapedNode<'a> {
    fn find(&self, selector: &str) -> Option<Self> {
        let selector = compile(selector)?;
        self.0.select(&selector).next().map(ScrapedNode)
    }

    fn find_all(&self, selector: &str) -> Vec<Self> {
        match compile(selector) {
            Some(selector) => self.0.select(&selector).map(ScrapedNode).collect(),
            None => Vec::new(),
        }
    }

    fn closest(&self, selector: &str) -> Option<Self> {
        let selector = compile(selector)?;
        let node = *self.0;
        node.ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| selector.matches(el))
            .map(ScrapedNode)
    }

    fn find_next(&self, selector: &str) -> Option<Self> {
        let selector = compile(selector)?;

        if let Some(found) = self.0.select(&selector).next() {
            return Some(ScrapedNode(found));
        }

        // Walk forward through following siblings, then the parent's, and so on up.
        let mut current = Some(*self.0);
        while let Some(node) = current {
            for sibling in node.next_siblings() {
                let Some(el) = ElementRef::wrap(sibling) else {
                    continue;
                };
                if selector.matches(&el) {
                    return Some(ScrapedNode(el));
                }
                if let Some(found) = el.select(&selector).next() {
                    return Some(ScrapedNode(found));
                }
            }
            current = node.parent();
        }

        None
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }

    fn text(&self) -> String {
        self.0.text().collect::<Vec<_>>().join(" ")
    }
}

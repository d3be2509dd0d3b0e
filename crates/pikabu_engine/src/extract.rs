use engine_logging::engine_debug;
use scraper::{ElementRef, Html};

use crate::selectors::CompiledSelectors;
use crate::types::ParseError;

/// Fields read from a post document without any further fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFields {
    pub date: String,
    pub title: String,
    pub tags: Vec<String>,
    /// `href` of the post page's own title link, input to identity resolution.
    pub title_href: String,
}

/// Parses normalized bytes into a document. Bytes must be UTF-8 by now.
pub fn parse_document(bytes: &[u8]) -> Result<Html, ParseError> {
    let html = std::str::from_utf8(bytes).map_err(|err| ParseError {
        valid_up_to: err.valid_up_to(),
    })?;
    Ok(Html::parse_document(html))
}

/// `href` of the first title link inside every story block, in document order.
/// Blocks without a title link produce an empty string.
pub fn story_block_links(doc: &Html, selectors: &CompiledSelectors) -> Vec<String> {
    doc.select(&selectors.story_block)
        .map(|block| first_attr(block.select(&selectors.title_link).next(), "href"))
        .collect()
}

pub fn extract_post_fields(doc: &Html, selectors: &CompiledSelectors) -> PostFields {
    let title_link = doc.select(&selectors.title_link).next();

    let date = first_attr(doc.select(&selectors.datetime_attr).next(), "datetime");
    if date.is_empty() {
        engine_debug!("no post date");
    }

    let title = title_link.map(visible_text).unwrap_or_default();
    if title.is_empty() {
        engine_debug!("no post title");
    }

    let tags = doc.select(&selectors.tag_chip).map(visible_text).collect();

    PostFields {
        date,
        title,
        tags,
        title_href: first_attr(title_link, "href"),
    }
}

/// Returns the first excluded-tag selector that matches anywhere in `doc`.
pub fn matching_excluded_tag<'s>(doc: &Html, selectors: &'s CompiledSelectors) -> Option<&'s str> {
    selectors
        .excluded
        .iter()
        .find(|(_, sel)| doc.select(sel).next().is_some())
        .map(|(pattern, _)| pattern.as_str())
}

/// `href` of the first anchor in the document, the value used as a post identifier.
pub fn first_anchor_href(doc: &Html, selectors: &CompiledSelectors) -> String {
    first_attr(doc.select(&selectors.identity_anchor).next(), "href")
}

fn first_attr(element: Option<ElementRef<'_>>, name: &str) -> String {
    element
        .and_then(|el| el.value().attr(name))
        .unwrap_or_default()
        .to_string()
}

fn visible_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

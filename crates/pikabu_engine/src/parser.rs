use engine_logging::{engine_debug, engine_info, ok_or_log};
use scraper::Html;
use url::Url;

use crate::decode::normalize_encoding;
use crate::extract::{
    extract_post_fields, first_anchor_href, matching_excluded_tag, parse_document,
    story_block_links,
};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::identity::{is_known_post, resolve_fetch_url};
use crate::selectors::{CompiledSelectors, SelectorError, SelectorSet};
use crate::{BlockOutcome, PageError, PostRecord};

#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub listing_url: String,
    pub selectors: SelectorSet,
    /// Posts whose page matches any of these selectors are dropped.
    pub excluded_tags: Vec<String>,
    pub fetch: FetchSettings,
}

impl ParserConfig {
    pub fn new(listing_url: impl Into<String>) -> Self {
        Self {
            listing_url: listing_url.into(),
            selectors: SelectorSet::default(),
            excluded_tags: Vec::new(),
            fetch: FetchSettings::default(),
        }
    }
}

/// Walks one listing page and extracts a [`PostRecord`] per new, non-excluded post.
///
/// Every block is processed in document order and every fetch is awaited
/// before the next one starts.
pub struct PostParser {
    listing_url: String,
    base: Option<Url>,
    selectors: CompiledSelectors,
    fetcher: Box<dyn Fetcher>,
}

impl PostParser {
    pub fn new(config: ParserConfig) -> Result<Self, SelectorError> {
        let fetcher = ReqwestFetcher::new(config.fetch.clone());
        Self::with_fetcher(config, Box::new(fetcher))
    }

    pub fn with_fetcher(
        config: ParserConfig,
        fetcher: Box<dyn Fetcher>,
    ) -> Result<Self, SelectorError> {
        let selectors = CompiledSelectors::compile(&config.selectors, &config.excluded_tags)?;
        let base = Url::parse(&config.listing_url).ok();
        Ok(Self {
            listing_url: config.listing_url,
            base,
            selectors,
            fetcher,
        })
    }

    /// Fetches the listing page and returns the extracted posts in document order.
    ///
    /// Failures never propagate: a listing page that cannot be loaded yields an
    /// empty result, a block that fails at any step is left out.
    pub async fn get_posts(&self) -> Vec<PostRecord> {
        let Some(links) = self
            .load_page(&self.listing_url, |doc| story_block_links(doc, &self.selectors))
            .await
        else {
            return Vec::new();
        };
        engine_info!("{} story blocks on {}", links.len(), self.listing_url);

        let mut posts = Vec::new();
        for (index, link) in links.into_iter().enumerate() {
            match self.process_block(link).await {
                BlockOutcome::Emitted(post) => {
                    engine_info!("block {index}: post {} ({})", post.id, post.link);
                    posts.push(post);
                }
                outcome => engine_info!("block {index}: {outcome:?}"),
            }
        }
        posts
    }

    /// Runs one story block, identified by its title-link `href`, to a terminal outcome.
    pub async fn process_block(&self, link: String) -> BlockOutcome {
        let provisional = self.resolve_identity(&link).await;
        if is_known_post(&provisional) {
            return BlockOutcome::Skipped;
        }

        let Some(url) = resolve_fetch_url(&link, self.base.as_ref()) else {
            return BlockOutcome::Unreachable;
        };
        engine_debug!("post link: {link}");

        let page = self
            .load_page(url.as_str(), |doc| {
                match matching_excluded_tag(doc, &self.selectors) {
                    Some(selector) => Err(selector.to_string()),
                    None => Ok(extract_post_fields(doc, &self.selectors)),
                }
            })
            .await;
        let fields = match page {
            None => return BlockOutcome::Unreachable,
            Some(Err(selector)) => return BlockOutcome::Filtered { selector },
            Some(Ok(fields)) => fields,
        };

        let id = self.resolve_identity(&fields.title_href).await;
        if id.is_empty() {
            return BlockOutcome::Unidentified;
        }

        BlockOutcome::Emitted(PostRecord {
            date: fields.date,
            title: fields.title,
            tags: fields.tags,
            id,
            link,
        })
    }

    /// Fetches the page behind `href` and returns the `href` of its first anchor.
    /// Any failure yields an empty string.
    pub async fn resolve_identity(&self, href: &str) -> String {
        let Some(url) = resolve_fetch_url(href, self.base.as_ref()) else {
            engine_debug!("no fetchable link in {href:?}");
            return String::new();
        };
        self.load_page(url.as_str(), |doc| first_anchor_href(doc, &self.selectors))
            .await
            .unwrap_or_default()
    }

    /// Fetch, normalize and parse one page.
    pub async fn fetch_document(&self, url: &str) -> Result<Html, PageError> {
        let output = self.fetcher.fetch(url).await?;
        let body = normalize_encoding(output.bytes, output.metadata.content_type.as_deref())?;
        engine_debug!(
            "charset {} for {} (transcoded: {})",
            body.charset,
            url,
            body.transcoded
        );
        Ok(parse_document(&body.bytes)?)
    }

    async fn load_page<T>(&self, url: &str, read: impl FnOnce(&Html) -> T) -> Option<T> {
        let result = self.fetch_document(url).await.map(|doc| read(&doc));
        ok_or_log(&format!("skipping {url}"), result)
    }
}

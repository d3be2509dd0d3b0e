//! Pikabu engine: listing fetch, encoding normalization and post extraction.
mod decode;
mod extract;
mod fetch;
mod identity;
mod parser;
mod selectors;
mod types;

pub use decode::{detect_charset, normalize_encoding, DecodeError, NormalizedBody};
pub use extract::{
    extract_post_fields, first_anchor_href, matching_excluded_tag, parse_document,
    story_block_links, PostFields,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use identity::{is_known_post, resolve_fetch_url};
pub use parser::{ParserConfig, PostParser};
pub use selectors::{CompiledSelectors, SelectorError, SelectorRule, SelectorSet};
pub use types::{
    BlockOutcome, ErrorClass, FailureKind, FetchError, FetchMetadata, FetchOutput, PageError,
    ParseError, PostRecord,
};

use std::fmt;

use serde::Serialize;

use crate::decode::DecodeError;

/// One extracted post. Field order matches the serialized output line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    pub date: String,
    pub title: String,
    pub tags: Vec<String>,
    pub id: String,
    pub link: String,
}

impl PostRecord {
    /// Renders the record as a single JSON line.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

impl fmt::Display for PostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Terminal state of one story block's journey through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    /// Provisional identifier was empty.
    Skipped,
    /// Post page could not be fetched, normalized or parsed.
    Unreachable,
    /// Post page matched an excluded tag selector.
    Filtered { selector: String },
    /// Post-mode identifier came back empty.
    Unidentified,
    Emitted(PostRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("document is not valid UTF-8 at byte {valid_up_to}")]
pub struct ParseError {
    pub valid_up_to: usize,
}

/// Coarse failure class shared by every fetch/normalize/parse step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Network,
    Encoding,
    Parse,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Network(#[from] FetchError),
    #[error(transparent)]
    Encoding(#[from] DecodeError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl PageError {
    pub fn class(&self) -> ErrorClass {
        match self {
            PageError::Network(_) => ErrorClass::Network,
            PageError::Encoding(_) => ErrorClass::Encoding,
            PageError::Parse(_) => ErrorClass::Parse,
        }
    }
}

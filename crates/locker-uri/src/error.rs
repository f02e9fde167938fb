use thiserror::Error;

/// Errors produced by URI parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UriError {
    /// The string does not have the canonical `scheme://bucket/key` shape.
    #[error("malformed storage uri {uri:?}: {reason}")]
    Malformed { uri: String, reason: String },
}

impl UriError {
    pub(crate) fn malformed(uri: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            uri: uri.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias for URI operations.
pub type UriResult<T> = Result<T, UriError>;

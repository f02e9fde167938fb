use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{UriError, UriResult};

/// Canonical reference to a remote object: `scheme://bucket/key`.
///
/// A `StorageUri` is immutable once constructed and is the sole durable
/// representation of an object reference. It serializes as the canonical
/// string and deserialization re-validates the shape, so a malformed value
/// can never round-trip through persistence.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageUri {
    scheme: String,
    bucket: String,
    key: String,
}

impl StorageUri {
    /// Assemble a URI from already-validated parts.
    ///
    /// The caller guarantees that all parts are non-empty, that the scheme
    /// contains no `:` or `/`, and that the bucket contains no `/`. Parts
    /// produced by [`parse`](Self::parse) or by a configured signer satisfy
    /// this by construction.
    pub fn build(
        scheme: impl Into<String>,
        bucket: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Parse a canonical `scheme://bucket/key` string.
    ///
    /// Fails when the `://` separator is missing, when the remainder has no
    /// `/` separator, or when any resulting part is empty. The first `://`
    /// and the first `/` of the remainder are the only significant
    /// separators; keys may freely contain further `/`. No normalization or
    /// decoding is performed.
    pub fn parse(uri: &str) -> UriResult<Self> {
        let (scheme, rest) = uri
            .split_once("://")
            .ok_or_else(|| UriError::malformed(uri, "missing '://' separator"))?;
        if scheme.is_empty() {
            return Err(UriError::malformed(uri, "empty scheme"));
        }
        let (bucket, key) = rest
            .split_once('/')
            .ok_or_else(|| UriError::malformed(uri, "missing '/' between bucket and key"))?;
        if bucket.is_empty() {
            return Err(UriError::malformed(uri, "empty bucket"));
        }
        if key.is_empty() {
            return Err(UriError::malformed(uri, "empty key"));
        }
        Ok(Self {
            scheme: scheme.to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    /// The backend tag (e.g. "s3").
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The bucket path segment.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The full object key (everything after the bucket).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The trailing path segment of the key (the raw object name).
    ///
    /// For keys containing `/`, only the part after the final `/` is
    /// returned.
    pub fn last_segment(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or("")
    }
}

impl fmt::Display for StorageUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
    }
}

impl fmt::Debug for StorageUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageUri({self})")
    }
}

impl FromStr for StorageUri {
    type Err = UriError;

    fn from_str(s: &str) -> UriResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StorageUri {
    type Error = UriError;

    fn try_from(s: String) -> UriResult<Self> {
        Self::parse(&s)
    }
}

impl From<StorageUri> for String {
    fn from(uri: StorageUri) -> Self {
        uri.to_string()
    }
}

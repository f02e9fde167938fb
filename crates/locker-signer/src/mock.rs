//! Recording signer for tests and embedding.
//!
//! [`MockSigner`] performs no cryptography: it records every `sign` call
//! behind an `RwLock` and returns a predictable `signed://` URL, so tests
//! can assert exactly which bucket/key/ttl triples reached the backend and
//! how many times.

use std::sync::RwLock;

use crate::error::{SignerError, SignerResult};
use crate::traits::UrlSigner;

/// An in-memory [`UrlSigner`] that records its calls.
///
/// The produced URL is `signed://{bucket}/{key}?ttl={ttl}`. Scheme is always
/// `mock`.
#[derive(Debug)]
pub struct MockSigner {
    bucket: String,
    calls: RwLock<Vec<(String, String, u64)>>,
}

impl MockSigner {
    /// Create a mock signer with the given default bucket.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Every `(bucket, key, ttl)` triple passed to `sign`, in call order.
    pub fn calls(&self) -> Vec<(String, String, u64)> {
        self.calls
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of `sign` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl UrlSigner for MockSigner {
    fn scheme(&self) -> &str {
        "mock"
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn sign(&self, bucket: &str, key: &str, ttl: u64) -> SignerResult<String> {
        let mut calls = self
            .calls
            .write()
            .map_err(|e| SignerError::Backend(format!("lock poisoned: {e}")))?;
        calls.push((bucket.to_string(), key.to_string(), ttl));
        Ok(format!("signed://{bucket}/{key}?ttl={ttl}"))
    }
}

//! The shared storage context: the active signer plus the URI build, parse,
//! and sign operations against it.

use std::sync::{Arc, RwLock};

use tracing::debug;

use locker_signer::UrlSigner;
use locker_uri::StorageUri;

use crate::error::{RefError, Result};

/// Process-wide storage configuration handle.
///
/// One context holds the single active [`UrlSigner`]. Construct it during
/// application startup and share it by handle (`Arc`) with every
/// [`SignedRef`](crate::SignedRef). Installing a signer again silently
/// replaces the previous one; the host application's startup sequencing is
/// responsible for ordering `initialize` before concurrent reads. After
/// initialization the signer slot is read-mostly and concurrent reads are
/// safe.
pub struct StorageContext {
    signer: RwLock<Option<Arc<dyn UrlSigner>>>,
}

impl StorageContext {
    /// Create an unconfigured context.
    ///
    /// Every operation fails with [`RefError::NotConfigured`] until
    /// [`initialize`](Self::initialize) installs a signer.
    pub fn new() -> Self {
        Self {
            signer: RwLock::new(None),
        }
    }

    /// Create a context with the signer already installed.
    pub fn configured(signer: Arc<dyn UrlSigner>) -> Self {
        let ctx = Self::new();
        ctx.initialize(signer);
        ctx
    }

    /// Install (or silently replace) the active signer.
    pub fn initialize(&self, signer: Arc<dyn UrlSigner>) {
        debug!(
            scheme = signer.scheme(),
            bucket = signer.bucket(),
            "storage signer installed"
        );
        let mut slot = self.signer.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(signer);
    }

    /// Returns `true` once a signer has been installed.
    pub fn is_configured(&self) -> bool {
        self.signer
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    fn active_signer(&self) -> Result<Arc<dyn UrlSigner>> {
        self.signer
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(RefError::NotConfigured)
    }

    /// Mint a canonical URI for a brand-new object path from the active
    /// signer's scheme and default bucket. A leading `/` on the object path
    /// is stripped.
    ///
    /// Existing references must never be re-derived through this method:
    /// the default bucket may change between deployments, and stored URIs
    /// are the source of truth.
    pub fn build_uri(&self, object_path: &str) -> Result<StorageUri> {
        let signer = self.active_signer()?;
        let path = object_path.trim_start_matches('/');
        Ok(StorageUri::build(signer.scheme(), signer.bucket(), path))
    }

    /// Parse a stored canonical string into its `(bucket, key)` location,
    /// validating the scheme against the active signer.
    pub fn parse_uri(&self, uri: &str) -> Result<(String, String)> {
        let signer = self.active_signer()?;
        let parsed = StorageUri::parse(uri)?;
        check_scheme(signer.as_ref(), &parsed)?;
        Ok((parsed.bucket().to_string(), parsed.key().to_string()))
    }

    /// The `(bucket, key)` location of an already-parsed URI, validated
    /// against the active signer's scheme.
    pub fn locate(&self, uri: &StorageUri) -> Result<(String, String)> {
        let signer = self.active_signer()?;
        check_scheme(signer.as_ref(), uri)?;
        Ok((uri.bucket().to_string(), uri.key().to_string()))
    }

    /// Derive a signed URL for `uri`, valid for `ttl` seconds.
    ///
    /// The bucket and key handed to the signer always come from the URI
    /// itself, never from the signer's default bucket, so references stored
    /// under an older default bucket keep resolving.
    pub fn sign(&self, uri: &StorageUri, ttl: u64) -> Result<String> {
        let signer = self.active_signer()?;
        check_scheme(signer.as_ref(), uri)?;
        debug!(
            bucket = uri.bucket(),
            key = uri.key(),
            ttl,
            "signing storage uri"
        );
        Ok(signer.sign(uri.bucket(), uri.key(), ttl)?)
    }
}

impl Default for StorageContext {
    fn default() -> Self {
        Self::new()
    }
}

fn check_scheme(signer: &dyn UrlSigner, uri: &StorageUri) -> Result<()> {
    if uri.scheme() != signer.scheme() {
        return Err(RefError::SchemeMismatch {
            expected: signer.scheme().to_string(),
            actual: uri.scheme().to_string(),
        });
    }
    Ok(())
}

//! The per-object signed reference.
//!
//! A [`SignedRef`] owns one object reference end to end: raw key in,
//! canonical URI persisted, signed URL out. It is the only mutation path
//! for the reference, which is what keeps the memoized signed URL honest —
//! the memo is cleared exactly when the key changes and nowhere else.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use locker_uri::StorageUri;

use crate::context::StorageContext;
use crate::error::{RefError, Result};
use crate::keys::{join_path, validate_raw_key};

/// Default signed-URL validity window, in seconds.
pub const DEFAULT_TTL: u64 = 300;

/// One reference to one remote object.
///
/// The canonical URI is the only durable state: persist
/// [`stored_uri`](Self::stored_uri) in a single string column and rehydrate
/// with [`restore`](Self::restore). Everything else — the raw key, the
/// `(bucket, key)` location, the signed URL — is derived on demand.
///
/// The memoized signed URL never expires on its own; consumers that care
/// about freshness past the TTL re-derive after reassigning the key. A
/// `SignedRef` is owned by one logical entity (typically one loaded record)
/// and is not meant for concurrent mutation — the `&mut self` mutators
/// encode that.
pub struct SignedRef {
    ctx: Arc<StorageContext>,
    field: String,
    base_path: String,
    ttl: u64,
    uri: Option<StorageUri>,
    signed_cache: Option<String>,
}

impl SignedRef {
    /// Create an empty reference for the named field.
    ///
    /// `field` is the logical field name on the host record (e.g.
    /// "profile_image"); it appears in validation errors so callers can
    /// tell which of several references rejected a value.
    pub fn new(ctx: Arc<StorageContext>, field: impl Into<String>) -> Self {
        Self {
            ctx,
            field: field.into(),
            base_path: String::new(),
            ttl: DEFAULT_TTL,
            uri: None,
            signed_cache: None,
        }
    }

    /// Base path inside the bucket, prepended to every raw key. Surrounding
    /// `/` separators are trimmed.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.trim_matches('/').to_string();
        self
    }

    /// Signed-URL validity window for this field, in seconds. Fixed per
    /// field; [`signed_url`](Self::signed_url) always uses it.
    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = ttl;
        self
    }

    /// Assign or clear the raw key.
    ///
    /// `None` clears the reference: the URI becomes absent and the memoized
    /// signed URL is dropped. Otherwise the key is validated (each violated
    /// rule produces [`RefError::InvalidKey`] naming the field and the
    /// rule), joined onto the base path, and minted into a canonical URI
    /// through the context. The memo is cleared unconditionally, even when
    /// the new URI equals the old one.
    ///
    /// A failed `set_key` leaves the prior URI and memo untouched.
    pub fn set_key(&mut self, raw_key: Option<&str>) -> Result<()> {
        let Some(raw) = raw_key else {
            self.uri = None;
            self.signed_cache = None;
            return Ok(());
        };
        validate_raw_key(raw, &self.field)?;
        let object_path = join_path(&self.base_path, raw);
        let uri = self.ctx.build_uri(&object_path)?;
        debug!(field = %self.field, key = raw, "reference key assigned");
        self.uri = Some(uri);
        self.signed_cache = None;
        Ok(())
    }

    /// The raw key: the trailing segment after the final `/` of the stored
    /// URI.
    ///
    /// This is a derived view, independent of the base path. For keys that
    /// themselves contain `/`, only the trailing segment is returned.
    pub fn key(&self) -> Option<&str> {
        self.uri.as_ref().map(StorageUri::last_segment)
    }

    /// The canonical URI, read-only.
    pub fn uri(&self) -> Option<&StorageUri> {
        self.uri.as_ref()
    }

    /// Always fails with [`RefError::ReadOnlyField`].
    ///
    /// The URI is derived state; assign a raw key via
    /// [`set_key`](Self::set_key) instead. This method exists so
    /// persistence glue that routes writes through the reference fails
    /// loudly instead of bypassing key validation.
    pub fn set_uri(&mut self, _uri: &str) -> Result<()> {
        Err(RefError::ReadOnlyField {
            field: self.field.clone(),
        })
    }

    /// The `(bucket, key)` location parsed from the stored URI, or `None`
    /// when no object is referenced.
    pub fn location(&self) -> Result<Option<(String, String)>> {
        match &self.uri {
            None => Ok(None),
            Some(uri) => self.ctx.locate(uri).map(Some),
        }
    }

    /// The signed URL for this reference, memoized until the key changes.
    ///
    /// Returns `None` without consulting the signer when no object is
    /// referenced. A memo hit returns the cached URL unchanged; otherwise
    /// the context signs the stored URI with this field's TTL and the
    /// result is memoized.
    pub fn signed_url(&mut self) -> Result<Option<String>> {
        let Some(uri) = &self.uri else {
            return Ok(None);
        };
        if let Some(cached) = &self.signed_cache {
            trace!(field = %self.field, "signed url memo hit");
            return Ok(Some(cached.clone()));
        }
        let url = self.ctx.sign(uri, self.ttl)?;
        self.signed_cache = Some(url.clone());
        Ok(Some(url))
    }

    /// Rehydrate from the persisted column value.
    ///
    /// Reserved for the persistence layer loading a record: validates the
    /// canonical shape (but not the scheme — that is checked against the
    /// active signer on first use) and drops any memoized signed URL.
    pub fn restore(&mut self, stored: Option<&str>) -> Result<()> {
        let uri = match stored {
            None => None,
            Some(s) => Some(StorageUri::parse(s)?),
        };
        self.uri = uri;
        self.signed_cache = None;
        Ok(())
    }

    /// The exact string for the persisted column, or `None` when no object
    /// is referenced.
    pub fn stored_uri(&self) -> Option<String> {
        self.uri.as_ref().map(StorageUri::to_string)
    }

    /// The logical field name this reference reports errors under.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The base path prepended to raw keys.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// This field's signed-URL validity window, in seconds.
    pub fn ttl(&self) -> u64 {
        self.ttl
    }
}

// Signed URLs grant access and must not leak through Debug output.
impl fmt::Debug for SignedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedRef")
            .field("field", &self.field)
            .field("base_path", &self.base_path)
            .field("ttl", &self.ttl)
            .field("uri", &self.uri)
            .field(
                "signed_cache",
                &self.signed_cache.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

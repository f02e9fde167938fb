//! Canonical storage URIs for Locker.
//!
//! A [`StorageUri`] is the durable form of an object reference: a string of
//! exact shape `scheme://bucket/key`, where the scheme tags the storage
//! backend, the bucket is a single path segment, and the key is everything
//! after the first `/` of the remainder (keys may contain further `/`).
//!
//! The codec is deliberately dumb: no normalization, no percent-decoding, no
//! I/O. The string is treated as already-canonical, so building a URI from
//! parts and parsing it back is an exact round-trip. Only the *first* `://`
//! and the *first* `/` of the remainder are significant separators.
//!
//! # Modules
//!
//! - [`error`] — [`UriError`] for shape violations
//! - [`uri`] — the [`StorageUri`] value type

pub mod error;
pub mod uri;

pub use error::{UriError, UriResult};
pub use uri::StorageUri;

//! URL signing backends for Locker.
//!
//! This crate defines the capability any signing backend must implement and
//! ships three implementations. A signer produces a short-lived URL granting
//! temporary read access to one `bucket/key` pair; it never touches object
//! bytes and never performs bucket lifecycle operations.
//!
//! # The capability
//!
//! [`UrlSigner`] is the seam between the reference layer and the storage
//! backend. The one invariant worth repeating: `sign` operates on exactly
//! the bucket and key the caller supplies. A signer's own default bucket is
//! consulted only when a *new* URI is minted, so references stored before a
//! default-bucket change keep resolving against their original bucket.
//!
//! # Backends
//!
//! - [`MockSigner`] — records every call, for tests and embedding
//! - [`TokenSigner`] — keyed-BLAKE3 MAC presigner for self-hosted gateways
//! - [`S3Signer`] — AWS Signature Version 4 query-string presigner

pub mod error;
pub mod mock;
pub mod s3;
pub mod token;
pub mod traits;

pub use error::{SignerError, SignerResult};
pub use mock::MockSigner;
pub use s3::S3Signer;
pub use token::TokenSigner;
pub use traits::UrlSigner;

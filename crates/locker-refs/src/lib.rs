//! Signed object references for Locker.
//!
//! This crate turns a raw object key into a durable canonical URI and, on
//! demand, into a short-lived signed URL. It is the mediation layer between
//! an application's records and a storage backend's signer.
//!
//! # Architecture
//!
//! - A [`StorageContext`] holds the single active signer for a process. It
//!   is constructed once at startup and shared by handle (`Arc`) with every
//!   reference — there is no hidden global, so tests get isolated contexts.
//! - A [`SignedRef`] owns one object reference: the persisted URI
//!   (authoritative), and a memoized signed URL that is invalidated exactly
//!   when the key changes. All mutation flows through
//!   [`SignedRef::set_key`], which validates raw keys before any state
//!   changes.
//! - The stored URI is the source of truth. Signing always uses the bucket
//!   and key parsed from the URI, never the signer's current default
//!   bucket, so references outlive configuration changes.
//!
//! # Modules
//!
//! - [`error`] — [`RefError`] taxonomy for context and reference operations
//! - [`keys`] — raw-key validation and base-path composition
//! - [`context`] — the shared [`StorageContext`]
//! - [`reference`] — the per-object [`SignedRef`]

pub mod context;
pub mod error;
pub mod keys;
pub mod reference;

pub use context::StorageContext;
pub use error::{RefError, Result};
pub use keys::{join_path, validate_raw_key};
pub use reference::{SignedRef, DEFAULT_TTL};

//! Error types for reference operations.

use thiserror::Error;

use locker_signer::SignerError;
use locker_uri::UriError;

/// Errors that can occur during storage reference operations.
///
/// All errors are synchronous and surfaced to the caller of the mutating or
/// deriving operation; nothing is swallowed or retried. Messages name the
/// offending field and describe the value shape — signed URLs never appear
/// in them.
#[derive(Debug, Error)]
pub enum RefError {
    /// A context operation was invoked before a signer was installed.
    #[error("storage context not configured: install a signer during startup")]
    NotConfigured,

    /// A raw key violated a validation rule.
    #[error("invalid key for field '{field}': {reason}")]
    InvalidKey { field: String, reason: String },

    /// A parsed URI's scheme does not match the active signer.
    #[error("scheme mismatch: active signer handles '{expected}', uri carries '{actual}'")]
    SchemeMismatch { expected: String, actual: String },

    /// Direct write attempted on the derived, read-only URI accessor.
    #[error("field '{field}' is read-only: assign a raw key via set_key instead")]
    ReadOnlyField { field: String },

    /// A stored string failed canonical URI parsing.
    #[error(transparent)]
    Malformed(#[from] UriError),

    /// Failure surfaced unchanged from the signing backend.
    #[error(transparent)]
    Signing(#[from] SignerError),
}

/// Convenience type alias for reference operations.
pub type Result<T> = std::result::Result<T, RefError>;

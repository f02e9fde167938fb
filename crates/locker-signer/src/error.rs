use thiserror::Error;

/// Errors from URL signing backends.
///
/// Signing failures are backend-specific and opaque to the layers above:
/// they are surfaced unchanged, never retried. Error messages must never
/// contain a signed URL.
#[derive(Debug, Error)]
pub enum SignerError {
    /// Opaque failure reported by the signing backend.
    #[error("signing backend error: {0}")]
    Backend(String),

    /// The backend credentials are missing or unusable.
    #[error("signer credentials rejected: {0}")]
    Credentials(String),

    /// The requested validity window is outside what the backend allows.
    #[error("ttl not supported by backend: {0}")]
    UnsupportedTtl(String),
}

/// Result alias for signer operations.
pub type SignerResult<T> = Result<T, SignerError>;

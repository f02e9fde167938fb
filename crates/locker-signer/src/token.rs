//! Keyed-MAC presigner for self-hosted HTTP gateways.
//!
//! [`TokenSigner`] covers deployments where objects are served by a gateway
//! the operator controls (nginx module, edge worker, small proxy) instead of
//! a cloud provider. The signer stamps an expiry instant and a keyed-BLAKE3
//! MAC onto the object URL; the gateway recomputes the MAC with the shared
//! secret and rejects expired or tampered requests via [`TokenSigner::verify`].

use std::fmt;

use chrono::Utc;

use crate::error::{SignerError, SignerResult};
use crate::traits::UrlSigner;

/// A [`UrlSigner`] producing `{endpoint}/{bucket}/{key}?exp={unix}&sig={mac}`
/// URLs authenticated by a shared 32-byte secret.
pub struct TokenSigner {
    scheme: String,
    bucket: String,
    endpoint: String,
    secret: [u8; 32],
}

impl TokenSigner {
    /// Create a token signer.
    ///
    /// `scheme` tags URIs minted through this backend (e.g. "gw"),
    /// `endpoint` is the public base URL of the gateway (trailing `/`
    /// trimmed), and `secret` is the MAC key shared with the gateway.
    pub fn new(
        scheme: impl Into<String>,
        bucket: impl Into<String>,
        endpoint: &str,
        secret: [u8; 32],
    ) -> Self {
        Self {
            scheme: scheme.into(),
            bucket: bucket.into(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            secret,
        }
    }

    fn mac(&self, bucket: &str, key: &str, exp: i64) -> blake3::Hash {
        let message = format!("{bucket}\n{key}\n{exp}");
        blake3::keyed_hash(&self.secret, message.as_bytes())
    }

    /// Gateway-side check: recompute the MAC and compare in constant time.
    ///
    /// Returns `false` for expired instants, undecodable signatures, or MAC
    /// mismatches.
    pub fn verify(&self, bucket: &str, key: &str, exp: i64, sig: &str) -> bool {
        if exp < Utc::now().timestamp() {
            return false;
        }
        let decoded = match hex::decode(sig) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let Ok(bytes) = <[u8; 32]>::try_from(decoded.as_slice()) else {
            return false;
        };
        // blake3::Hash equality is constant-time.
        blake3::Hash::from(bytes) == self.mac(bucket, key, exp)
    }
}

impl UrlSigner for TokenSigner {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn sign(&self, bucket: &str, key: &str, ttl: u64) -> SignerResult<String> {
        let ttl = i64::try_from(ttl)
            .map_err(|_| SignerError::UnsupportedTtl(format!("{ttl} seconds overflows")))?;
        let exp = Utc::now().timestamp().saturating_add(ttl);
        let sig = self.mac(bucket, key, exp).to_hex();
        Ok(format!(
            "{}/{bucket}/{key}?exp={exp}&sig={sig}",
            self.endpoint
        ))
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("scheme", &self.scheme)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("gw", "media", "https://media.example.com/", [7u8; 32])
    }

    fn query_param(url: &str, name: &str) -> String {
        let (_, query) = url.split_once('?').unwrap();
        query
            .split('&')
            .find_map(|pair| {
                let (k, v) = pair.split_once('=').unwrap();
                (k == name).then(|| v.to_string())
            })
            .unwrap()
    }

    #[test]
    fn sign_then_verify_succeeds() {
        let s = signer();
        let url = s.sign("media", "users/a.png", 600).unwrap();
        let exp: i64 = query_param(&url, "exp").parse().unwrap();
        let sig = query_param(&url, "sig");
        assert!(s.verify("media", "users/a.png", exp, &sig));
    }

    #[test]
    fn url_shape_and_trimmed_endpoint() {
        let s = signer();
        let url = s.sign("media", "users/a.png", 600).unwrap();
        assert!(url.starts_with("https://media.example.com/media/users/a.png?exp="));
    }

    #[test]
    fn verify_rejects_tampered_key() {
        let s = signer();
        let url = s.sign("media", "users/a.png", 600).unwrap();
        let exp: i64 = query_param(&url, "exp").parse().unwrap();
        let sig = query_param(&url, "sig");
        assert!(!s.verify("media", "users/other.png", exp, &sig));
        assert!(!s.verify("other-bucket", "users/a.png", exp, &sig));
    }

    #[test]
    fn verify_rejects_expired_instant() {
        let s = signer();
        let exp = Utc::now().timestamp() - 10;
        let sig = s.mac("media", "a.png", exp).to_hex().to_string();
        assert!(!s.verify("media", "a.png", exp, &sig));
    }

    #[test]
    fn verify_rejects_garbage_signature() {
        let s = signer();
        let exp = Utc::now().timestamp() + 600;
        assert!(!s.verify("media", "a.png", exp, "not-hex"));
        assert!(!s.verify("media", "a.png", exp, "abcd"));
    }

    #[test]
    fn different_secrets_produce_different_signatures() {
        let a = TokenSigner::new("gw", "media", "https://e.com", [1u8; 32]);
        let b = TokenSigner::new("gw", "media", "https://e.com", [2u8; 32]);
        assert_ne!(
            a.mac("media", "k.png", 1000).to_hex().to_string(),
            b.mac("media", "k.png", 1000).to_hex().to_string()
        );
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", signer());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret: [7"));
    }
}

//! AWS Signature Version 4 query-string presigner.
//!
//! [`S3Signer`] produces presigned GET URLs for S3-compatible object stores
//! without going through an SDK: presigning is a pure computation over the
//! request shape, credentials, and a signing instant. Virtual-hosted
//! addressing (`{bucket}.s3.{region}.amazonaws.com`) is used by default;
//! configuring a custom endpoint switches to path-style addressing for
//! MinIO-style deployments.

use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};

use crate::error::{SignerError, SignerResult};
use crate::traits::UrlSigner;

type HmacSha256 = Hmac<Sha256>;

/// SigV4 presigned URLs are valid for at most seven days.
const MAX_TTL: u64 = 604_800;

/// RFC 3986 unreserved characters stay literal; everything else is encoded.
const STRICT: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Path encoding additionally keeps `/` separators literal.
const PATH: AsciiSet = STRICT.remove(b'/');

/// A [`UrlSigner`] for S3-compatible backends. Scheme is always `s3`.
pub struct S3Signer {
    bucket: String,
    region: String,
    access_key: String,
    secret_key: String,
    endpoint: Option<String>,
}

impl S3Signer {
    /// Create a signer for the given default bucket, region, and static
    /// credentials.
    pub fn new(
        bucket: impl Into<String>,
        region: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            endpoint: None,
        }
    }

    /// Sign against a custom endpoint (e.g. `http://localhost:9000` for
    /// MinIO) using path-style addressing. The trailing `/` is trimmed.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.trim_end_matches('/').to_string());
        self
    }

    /// Presign a GET for `bucket`/`key` at a pinned signing instant.
    ///
    /// The output is fully determined by the inputs, which is what the tests
    /// rely on; [`UrlSigner::sign`] supplies the current instant.
    fn presign_at(
        &self,
        bucket: &str,
        key: &str,
        ttl: u64,
        now: DateTime<Utc>,
    ) -> SignerResult<String> {
        if ttl == 0 || ttl > MAX_TTL {
            return Err(SignerError::UnsupportedTtl(format!(
                "sigv4 allows 1..={MAX_TTL} seconds, got {ttl}"
            )));
        }

        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let datestamp = now.format("%Y%m%d").to_string();
        let scope = format!("{datestamp}/{}/s3/aws4_request", self.region);

        let encoded_key = utf8_percent_encode(key, &PATH).to_string();
        let (base, host, canonical_path) = match &self.endpoint {
            Some(endpoint) => {
                let host = endpoint
                    .strip_prefix("https://")
                    .or_else(|| endpoint.strip_prefix("http://"))
                    .unwrap_or(endpoint)
                    .to_string();
                let encoded_bucket = utf8_percent_encode(bucket, &PATH).to_string();
                (
                    endpoint.clone(),
                    host,
                    format!("/{encoded_bucket}/{encoded_key}"),
                )
            }
            None => {
                let host = format!("{bucket}.s3.{}.amazonaws.com", self.region);
                (format!("https://{host}"), host, format!("/{encoded_key}"))
            }
        };

        let credential = format!("{}/{scope}", self.access_key);
        // Parameter names are already in canonical (sorted) order.
        let canonical_query = [
            ("X-Amz-Algorithm", "AWS4-HMAC-SHA256".to_string()),
            (
                "X-Amz-Credential",
                utf8_percent_encode(&credential, &STRICT).to_string(),
            ),
            ("X-Amz-Date", amz_date.clone()),
            ("X-Amz-Expires", ttl.to_string()),
            ("X-Amz-SignedHeaders", "host".to_string()),
        ]
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");

        let canonical_request = format!(
            "GET\n{canonical_path}\n{canonical_query}\nhost:{host}\n\nhost\nUNSIGNED-PAYLOAD"
        );
        let hashed_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = format!("AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{hashed_request}");

        let k_date = hmac_sha256(
            format!("AWS4{}", self.secret_key).as_bytes(),
            datestamp.as_bytes(),
        )?;
        let k_region = hmac_sha256(&k_date, self.region.as_bytes())?;
        let k_service = hmac_sha256(&k_region, b"s3")?;
        let k_signing = hmac_sha256(&k_service, b"aws4_request")?;
        let signature = hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes())?);

        Ok(format!(
            "{base}{canonical_path}?{canonical_query}&X-Amz-Signature={signature}"
        ))
    }
}

impl UrlSigner for S3Signer {
    fn scheme(&self) -> &str {
        "s3"
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn sign(&self, bucket: &str, key: &str, ttl: u64) -> SignerResult<String> {
        self.presign_at(bucket, key, ttl, Utc::now())
    }
}

impl fmt::Debug for S3Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Signer")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> SignerResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| SignerError::Credentials(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

//! Svix webhook signature verification
//!
//! Clerk delivers webhooks through Svix: each request carries a message id,
//! a unix timestamp and one or more HMAC-SHA256 signatures over
//! `"{id}.{timestamp}.{body}"`, keyed by a shared `whsec_` secret.
//! Verification fails closed; an event is never acted upon unless one
//! signature matches and the timestamp is within tolerance.

use base64::prelude::*;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Request header carrying the message identifier
pub const HEADER_MESSAGE_ID: &str = "svix-id";
/// Request header carrying the unix timestamp of the attempt
pub const HEADER_TIMESTAMP: &str = "svix-timestamp";
/// Request header carrying the space-separated signature list
pub const HEADER_SIGNATURE: &str = "svix-signature";

const SECRET_PREFIX: &str = "whsec_";
const SIGNATURE_VERSION: &str = "v1";

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    #[error("invalid webhook secret: {0}")]
    InvalidSecret(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("message timestamp outside of tolerance")]
    TimestampOutOfTolerance,

    #[error("no matching signature found")]
    NoMatchingSignature,
}

/// Verifies Svix signatures with a fixed shared secret.
///
/// Cheap to clone behind an `Arc`; holds only the decoded key and the
/// allowed clock skew.
#[derive(Debug)]
pub struct WebhookVerifier {
    key: Vec<u8>,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    pub const DEFAULT_TOLERANCE_SECS: u64 = 300; // 5 minutes

    pub fn new(secret: &str) -> Result<Self, SignatureError> {
        Self::with_tolerance(secret, Self::DEFAULT_TOLERANCE_SECS)
    }

    pub fn with_tolerance(secret: &str, tolerance_secs: u64) -> Result<Self, SignatureError> {
        // The `whsec_` prefix is decoration; the key is the base64 part
        let encoded = secret.strip_prefix(SECRET_PREFIX).unwrap_or(secret);
        let key = BASE64_STANDARD
            .decode(encoded)
            .map_err(|e| SignatureError::InvalidSecret(e.to_string()))?;

        Ok(Self {
            key,
            tolerance_secs: tolerance_secs as i64,
        })
    }

    /// Verify one delivery attempt against the raw, unparsed body bytes.
    ///
    /// Re-serialized bodies will not verify; callers must pass the payload
    /// exactly as received on the wire.
    pub fn verify(
        &self,
        msg_id: &str,
        timestamp: &str,
        signature_header: &str,
        payload: &[u8],
    ) -> Result<(), SignatureError> {
        self.verify_at(
            msg_id,
            timestamp,
            signature_header,
            payload,
            Utc::now().timestamp(),
        )
    }

    fn verify_at(
        &self,
        msg_id: &str,
        timestamp: &str,
        signature_header: &str,
        payload: &[u8],
        now: i64,
    ) -> Result<(), SignatureError> {
        let ts = timestamp
            .trim()
            .parse::<i64>()
            .map_err(|_| SignatureError::InvalidTimestamp(timestamp.to_string()))?;

        // Reject both stale and future-dated attempts
        if (now - ts).abs() > self.tolerance_secs {
            return Err(SignatureError::TimestampOutOfTolerance);
        }

        let mac = self.compute_mac(msg_id, timestamp, payload)?;

        // The header may list several signatures (e.g. after a secret
        // rotation); any matching v1 entry authenticates the message.
        for entry in signature_header.split_ascii_whitespace() {
            let Some((version, encoded)) = entry.split_once(',') else {
                continue;
            };
            if version != SIGNATURE_VERSION {
                continue;
            }
            let Ok(candidate) = BASE64_STANDARD.decode(encoded) else {
                continue;
            };
            // Constant-time comparison
            if mac.clone().verify_slice(&candidate).is_ok() {
                return Ok(());
            }
        }

        Err(SignatureError::NoMatchingSignature)
    }

    /// Produce the signature Svix would send for this message, as a
    /// `v1,<base64>` header entry. Used to sign outbound test fixtures.
    pub fn sign(
        &self,
        msg_id: &str,
        timestamp: &str,
        payload: &[u8],
    ) -> Result<String, SignatureError> {
        let mac = self.compute_mac(msg_id, timestamp, payload)?;
        let tag = mac.finalize().into_bytes();
        Ok(format!(
            "{},{}",
            SIGNATURE_VERSION,
            BASE64_STANDARD.encode(tag)
        ))
    }

    fn compute_mac(
        &self,
        msg_id: &str,
        timestamp: &str,
        payload: &[u8],
    ) -> Result<HmacSha256, SignatureError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| SignatureError::InvalidSecret(format!("HMAC key error: {}", e)))?;
        mac.update(msg_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac)
    }
}

//! Typed decode of verified webhook payloads.
//!
//! The payload is only parsed after signature verification succeeds, and it
//! is parsed into a tagged enum rather than a loose map: a `user.created`
//! event with a malformed `data` object is a decode error, not a runtime
//! field-access failure.

use serde::Deserialize;

use crate::core::error::AppError;

/// One verified event from the identity provider.
///
/// Event types this service does not handle decode to [`WebhookEvent::Unhandled`]
/// and are acknowledged without any downstream call.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum WebhookEvent {
    #[serde(rename = "user.created")]
    UserCreated { data: UserPayload },

    #[serde(other)]
    Unhandled,
}

/// Subset of the Clerk user record this service consumes
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub id: String,
    pub primary_email_address: String,
}

impl WebhookEvent {
    /// Decode a verified payload. Lives one request; nothing is persisted.
    pub fn from_payload(payload: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(payload)
            .map_err(|e| AppError::BadRequest(format!("Invalid event payload: {}", e)))
    }
}

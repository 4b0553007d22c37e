use crate::core::config::ClerkConfig;
use crate::core::error::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Public metadata written onto the user record after provisioning.
///
/// Field names match what the frontend reads from the Clerk session
/// (`premium`, `stripeCustomerId`), hence the camelCase wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPublicMetadata {
    pub premium: String,
    pub stripe_customer_id: String,
}

/// Request body for the metadata merge endpoint
#[derive(Debug, Clone, Serialize)]
struct UpdateMetadataRequest {
    public_metadata: UserPublicMetadata,
}

/// Seam for the identity provider, injected into the provisioning service
/// so tests can substitute a recording implementation.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Merge `metadata` into the user's public metadata
    async fn update_public_metadata(
        &self,
        user_id: &str,
        metadata: UserPublicMetadata,
    ) -> Result<()>;
}

/// Client for the Clerk user management API
pub struct ClerkUserClient {
    config: ClerkConfig,
    http_client: reqwest::Client,
}

impl ClerkUserClient {
    pub fn new(config: ClerkConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IdentityClient for ClerkUserClient {
    async fn update_public_metadata(
        &self,
        user_id: &str,
        metadata: UserPublicMetadata,
    ) -> Result<()> {
        let url = format!("{}/users/{}/metadata", self.config.api_base_url, user_id);

        tracing::debug!("Updating public metadata for user {}", user_id);

        let response = self
            .http_client
            .patch(&url)
            .bearer_auth(&self.config.secret_key)
            .json(&UpdateMetadataRequest {
                public_metadata: metadata,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach Clerk: {}", e);
                AppError::ExternalService(format!("Failed to update user metadata: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Clerk API error: HTTP {} - {}", status, body);
            return Err(AppError::ExternalService(format!(
                "Clerk API error: HTTP {} - {}",
                status, body
            )));
        }

        tracing::info!("Updated public metadata for user {}", user_id);

        Ok(())
    }
}

use crate::core::config::StripeConfig;
use crate::core::error::{AppError, Result};
use crate::shared::constants::STRIPE_METADATA_CLERK_ID_KEY;
use async_trait::async_trait;
use serde::Deserialize;

/// Customer record created on the billing side. Only the id is consumed;
/// it is written into the user's metadata and not retained anywhere else.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingCustomer {
    pub id: String,
}

/// Seam for the billing provider, injected into the provisioning service so
/// tests can substitute a recording implementation.
#[async_trait]
pub trait BillingClient: Send + Sync {
    /// Create one customer for `email`, tagged with the identity-provider
    /// `user_id` as correlation metadata.
    async fn create_customer(&self, email: &str, user_id: &str) -> Result<BillingCustomer>;
}

/// Client for the Stripe customers API
pub struct StripeClient {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BillingClient for StripeClient {
    async fn create_customer(&self, email: &str, user_id: &str) -> Result<BillingCustomer> {
        let url = format!("{}/customers", self.config.api_base_url);

        tracing::debug!("Creating Stripe customer for user {}", user_id);

        // Stripe speaks form encoding, nested keys use bracket syntax
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .form(&[("email", email), (STRIPE_METADATA_CLERK_ID_KEY, user_id)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach Stripe: {}", e);
                AppError::ExternalService(format!("Failed to create Stripe customer: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Stripe API error: HTTP {} - {}", status, body);
            return Err(AppError::ExternalService(format!(
                "Stripe API error: HTTP {} - {}",
                status, body
            )));
        }

        let customer = response.json::<BillingCustomer>().await.map_err(|e| {
            tracing::error!("Failed to parse Stripe customer response: {}", e);
            AppError::ExternalService(format!("Failed to parse Stripe customer response: {}", e))
        })?;

        tracing::info!(
            "Created Stripe customer {} for user {}",
            customer.id,
            user_id
        );

        Ok(customer)
    }
}

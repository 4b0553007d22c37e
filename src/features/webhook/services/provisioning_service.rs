use crate::core::error::Result;
use crate::features::billing::clients::BillingClient;
use crate::features::users::clients::{IdentityClient, UserPublicMetadata};
use crate::features::webhook::events::UserPayload;
use crate::shared::constants::PREMIUM_STATUS_INITIAL;
use std::sync::Arc;

/// Provisions downstream records for a newly created user.
///
/// Two independent network calls, in order: create the billing customer,
/// then write `premium` and the customer id into the user's public metadata.
/// There is no transaction spanning the two and no compensation; a metadata
/// failure leaves the customer behind for manual reconciliation.
pub struct ProvisioningService {
    billing: Arc<dyn BillingClient>,
    identity: Arc<dyn IdentityClient>,
}

impl ProvisioningService {
    pub fn new(billing: Arc<dyn BillingClient>, identity: Arc<dyn IdentityClient>) -> Self {
        Self { billing, identity }
    }

    pub async fn provision_user(&self, user: &UserPayload) -> Result<()> {
        let customer = self
            .billing
            .create_customer(&user.primary_email_address, &user.id)
            .await?;

        let metadata = UserPublicMetadata {
            premium: PREMIUM_STATUS_INITIAL.to_string(),
            stripe_customer_id: customer.id.clone(),
        };

        if let Err(e) = self.identity.update_public_metadata(&user.id, metadata).await {
            tracing::error!(
                "Metadata update failed for user {}; Stripe customer {} is now orphaned",
                user.id,
                customer.id
            );
            return Err(e);
        }

        tracing::info!(
            "User {} provisioned: premium={}, stripeCustomerId={}",
            user.id,
            PREMIUM_STATUS_INITIAL,
            customer.id
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::{RecordingBillingClient, RecordingIdentityClient};

    fn test_user() -> UserPayload {
        UserPayload {
            id: "user_1".to_string(),
            primary_email_address: "jane@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_customer_then_updates_metadata() {
        let billing = Arc::new(RecordingBillingClient::returning("cus_42"));
        let identity = Arc::new(RecordingIdentityClient::default());
        let service = ProvisioningService::new(billing.clone(), identity.clone());

        service.provision_user(&test_user()).await.unwrap();

        let billing_calls = billing.calls.lock().unwrap();
        assert_eq!(
            *billing_calls,
            vec![("jane@example.com".to_string(), "user_1".to_string())]
        );

        let identity_calls = identity.calls.lock().unwrap();
        assert_eq!(identity_calls.len(), 1);
        let (user_id, metadata) = &identity_calls[0];
        assert_eq!(user_id, "user_1");
        assert_eq!(metadata.premium, "no");
        assert_eq!(metadata.stripe_customer_id, "cus_42");
    }

    #[tokio::test]
    async fn billing_failure_short_circuits_metadata_update() {
        let billing = Arc::new(RecordingBillingClient::failing());
        let identity = Arc::new(RecordingIdentityClient::default());
        let service = ProvisioningService::new(billing, identity.clone());

        let err = service.provision_user(&test_user()).await.unwrap_err();
        assert!(matches!(err, AppError::ExternalService(_)));
        assert!(identity.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn metadata_failure_is_propagated() {
        let billing = Arc::new(RecordingBillingClient::returning("cus_42"));
        let identity = Arc::new(RecordingIdentityClient::failing());
        let service = ProvisioningService::new(billing.clone(), identity);

        let err = service.provision_user(&test_user()).await.unwrap_err();
        assert!(matches!(err, AppError::ExternalService(_)));
        // The customer was still created; nothing rolls it back
        assert_eq!(billing.calls.lock().unwrap().len(), 1);
    }
}

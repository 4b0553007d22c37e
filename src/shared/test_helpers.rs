#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::billing::clients::{BillingClient, BillingCustomer};
#[cfg(test)]
use crate::features::users::clients::{IdentityClient, UserPublicMetadata};
#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use std::sync::Mutex;

/// Billing client double that records every call and optionally fails
#[cfg(test)]
pub struct RecordingBillingClient {
    pub customer_id: String,
    pub fail: bool,
    /// (email, user_id) per call
    pub calls: Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl RecordingBillingClient {
    pub fn returning(customer_id: &str) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            customer_id: String::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl BillingClient for RecordingBillingClient {
    async fn create_customer(&self, email: &str, user_id: &str) -> Result<BillingCustomer> {
        if self.fail {
            return Err(AppError::ExternalService(
                "simulated billing outage".to_string(),
            ));
        }
        self.calls
            .lock()
            .unwrap()
            .push((email.to_string(), user_id.to_string()));
        Ok(BillingCustomer {
            id: self.customer_id.clone(),
        })
    }
}

/// Identity client double that records every call and optionally fails
#[cfg(test)]
#[derive(Default)]
pub struct RecordingIdentityClient {
    pub fail: bool,
    /// (user_id, metadata) per call
    pub calls: Mutex<Vec<(String, UserPublicMetadata)>>,
}

#[cfg(test)]
impl RecordingIdentityClient {
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl IdentityClient for RecordingIdentityClient {
    async fn update_public_metadata(
        &self,
        user_id: &str,
        metadata: UserPublicMetadata,
    ) -> Result<()> {
        if self.fail {
            return Err(AppError::ExternalService(
                "simulated identity outage".to_string(),
            ));
        }
        self.calls
            .lock()
            .unwrap()
            .push((user_id.to_string(), metadata));
        Ok(())
    }
}

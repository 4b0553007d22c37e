use crate::features::webhook::handlers::webhook_handler;
use crate::features::webhook::services::ProvisioningService;
use crate::features::webhook::signature::WebhookVerifier;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Dependencies for the webhook endpoint, built once at startup and injected
#[derive(Clone)]
pub struct WebhookState {
    pub verifier: Arc<WebhookVerifier>,
    pub provisioning: Arc<ProvisioningService>,
}

pub fn routes(state: WebhookState) -> Router {
    Router::new()
        .route(
            "/api/webhook/clerk",
            post(webhook_handler::receive_clerk_webhook)
                .options(webhook_handler::webhook_preflight),
        )
        .with_state(state)
}

use utoipa::{Modify, OpenApi};

use crate::features::webhook::handlers::webhook_handler;
use crate::shared::types::{ErrorResponse, SuccessResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Webhooks
        webhook_handler::receive_clerk_webhook,
        webhook_handler::webhook_preflight,
    ),
    components(
        schemas(
            SuccessResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "webhooks", description = "Inbound identity provider webhooks"),
    ),
    info(
        title = "CloudCorp API",
        version = "0.1.0",
        description = "API documentation for CloudCorp",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

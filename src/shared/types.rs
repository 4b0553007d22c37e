use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgment body returned after a webhook event was fully processed
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Body returned on every failure path: `{ "error": "..." }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

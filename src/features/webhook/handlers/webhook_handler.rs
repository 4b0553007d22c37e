use crate::core::error::{AppError, Result};
use crate::features::webhook::events::WebhookEvent;
use crate::features::webhook::routes::WebhookState;
use crate::features::webhook::signature::{
    SignatureError, HEADER_MESSAGE_ID, HEADER_SIGNATURE, HEADER_TIMESTAMP,
};
use crate::shared::types::{ErrorResponse, SuccessResponse};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};

/// Receive one signed event from Clerk.
///
/// The body must stay raw until the signature is verified: any framework
/// level JSON parsing before verification would invalidate the signature.
/// The `Bytes` extractor guarantees that ordering.
#[utoipa::path(
    post,
    path = "/api/webhook/clerk",
    request_body(content = String, description = "Raw Svix-signed event payload"),
    responses(
        (status = 200, description = "Event processed", body = SuccessResponse),
        (status = 400, description = "Signature failure or unhandled event type", body = ErrorResponse),
        (status = 500, description = "Downstream provisioning failure", body = ErrorResponse)
    ),
    tag = "webhooks"
)]
pub async fn receive_clerk_webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SuccessResponse>> {
    let msg_id = require_header(&headers, HEADER_MESSAGE_ID)?;
    let timestamp = require_header(&headers, HEADER_TIMESTAMP)?;
    let signatures = require_header(&headers, HEADER_SIGNATURE)?;

    if let Err(e) = state.verifier.verify(msg_id, timestamp, signatures, &body) {
        tracing::warn!("Clerk webhook signature verification failed: {}", e);
        return Err(e.into());
    }

    match WebhookEvent::from_payload(&body)? {
        WebhookEvent::UserCreated { data } => {
            tracing::info!("Received user.created event for user {}", data.id);
            state.provisioning.provision_user(&data).await?;
            Ok(Json(SuccessResponse::ok()))
        }
        WebhookEvent::Unhandled => Err(AppError::UnhandledEvent),
    }
}

/// Preflight responder: always 200 with an empty JSON body and `Allow: POST`
#[utoipa::path(
    options,
    path = "/api/webhook/clerk",
    responses(
        (status = 200, description = "Preflight acknowledged")
    ),
    tag = "webhooks"
)]
pub async fn webhook_preflight() -> impl IntoResponse {
    ([(header::ALLOW, "POST")], Json(serde_json::json!({})))
}

fn require_header<'h>(headers: &'h HeaderMap, name: &'static str) -> Result<&'h str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| SignatureError::MissingHeader(name).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::webhook::routes::{self, WebhookState};
    use crate::features::webhook::services::ProvisioningService;
    use crate::features::webhook::signature::WebhookVerifier;
    use crate::shared::test_helpers::{RecordingBillingClient, RecordingIdentityClient};
    use axum::http::{Method, StatusCode};
    use axum_test::TestServer;
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::sync::Arc;

    const SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";
    const PATH: &str = "/api/webhook/clerk";

    fn server(
        billing: Arc<RecordingBillingClient>,
        identity: Arc<RecordingIdentityClient>,
    ) -> TestServer {
        let state = WebhookState {
            verifier: Arc::new(WebhookVerifier::new(SECRET).unwrap()),
            provisioning: Arc::new(ProvisioningService::new(billing, identity)),
        };
        TestServer::new(routes::routes(state)).unwrap()
    }

    fn signed_headers(body: &[u8]) -> (String, String, String) {
        let msg_id = "msg_test_1".to_string();
        let timestamp = Utc::now().timestamp().to_string();
        let signature = WebhookVerifier::new(SECRET)
            .unwrap()
            .sign(&msg_id, &timestamp, body)
            .unwrap();
        (msg_id, timestamp, signature)
    }

    fn user_created_body() -> Vec<u8> {
        json!({
            "type": "user.created",
            "data": {
                "id": "user_1",
                "primaryEmailAddress": "jane@example.com"
            }
        })
        .to_string()
        .into_bytes()
    }

    async fn post_signed(server: &TestServer, body: Vec<u8>) -> axum_test::TestResponse {
        let (msg_id, timestamp, signature) = signed_headers(&body);
        server
            .post(PATH)
            .add_header("svix-id", msg_id)
            .add_header("svix-timestamp", timestamp)
            .add_header("svix-signature", signature)
            .bytes(body.into())
            .await
    }

    #[tokio::test]
    async fn user_created_provisions_and_returns_success() {
        let billing = Arc::new(RecordingBillingClient::returning("cus_42"));
        let identity = Arc::new(RecordingIdentityClient::default());
        let server = server(billing.clone(), identity.clone());

        let response = post_signed(&server, user_created_body()).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "success": true }));

        assert_eq!(billing.calls.lock().unwrap().len(), 1);
        let identity_calls = identity.calls.lock().unwrap();
        assert_eq!(identity_calls.len(), 1);
        assert_eq!(identity_calls[0].1.stripe_customer_id, "cus_42");
    }

    #[tokio::test]
    async fn tampered_body_is_rejected_without_downstream_calls() {
        let billing = Arc::new(RecordingBillingClient::returning("cus_42"));
        let identity = Arc::new(RecordingIdentityClient::default());
        let server = server(billing.clone(), identity.clone());

        let (msg_id, timestamp, signature) = signed_headers(&user_created_body());
        let response = server
            .post(PATH)
            .add_header("svix-id", msg_id)
            .add_header("svix-timestamp", timestamp)
            .add_header("svix-signature", signature)
            .bytes(br#"{"type":"user.created","data":{"id":"user_evil","primaryEmailAddress":"evil@example.com"}}"#.to_vec().into())
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert!(body["error"].as_str().unwrap().starts_with("Webhook Error:"));

        assert!(billing.calls.lock().unwrap().is_empty());
        assert!(identity.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_signature_headers_are_rejected() {
        let billing = Arc::new(RecordingBillingClient::returning("cus_42"));
        let identity = Arc::new(RecordingIdentityClient::default());
        let server = server(billing.clone(), identity);

        let response = server.post(PATH).bytes(user_created_body().into()).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert!(billing.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_event_type_is_acknowledged_with_400() {
        let billing = Arc::new(RecordingBillingClient::returning("cus_42"));
        let identity = Arc::new(RecordingIdentityClient::default());
        let server = server(billing.clone(), identity.clone());

        let body = json!({ "type": "session.ended", "data": { "id": "sess_1" } })
            .to_string()
            .into_bytes();
        let response = post_signed(&server, body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "Unhandled event type" })
        );

        assert!(billing.calls.lock().unwrap().is_empty());
        assert!(identity.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn billing_failure_surfaces_as_500_and_skips_metadata_update() {
        let billing = Arc::new(RecordingBillingClient::failing());
        let identity = Arc::new(RecordingIdentityClient::default());
        let server = server(billing, identity.clone());

        let response = post_signed(&server, user_created_body()).await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.json::<Value>()["error"].is_string());
        assert!(identity.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn preflight_always_answers_allow_post() {
        let billing = Arc::new(RecordingBillingClient::returning("cus_42"));
        let identity = Arc::new(RecordingIdentityClient::default());
        let server = server(billing, identity);

        let response = server.method(Method::OPTIONS, PATH).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(axum::http::header::ALLOW)
                .and_then(|v| v.to_str().ok()),
            Some("POST")
        );
        assert_eq!(response.json::<Value>(), json!({}));
    }
}

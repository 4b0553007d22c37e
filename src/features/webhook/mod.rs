//! Inbound identity provider webhooks.
//!
//! One endpoint, one responsibility: authenticate a Svix-signed Clerk event
//! and, for `user.created`, provision a billing customer and write the
//! resulting customer id back onto the user record.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/webhook/clerk` | Verify and process one event |
//! | OPTIONS | `/api/webhook/clerk` | Preflight acknowledgment (`Allow: POST`) |

pub mod events;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod signature;

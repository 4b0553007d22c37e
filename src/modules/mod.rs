//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients for external services that are not identity/billing
//! providers, currently just the remote blob listing service.

pub mod storage;

//! Identity provider integration.
//!
//! Thin client for the Clerk management API, used to write provisioning
//! results (premium status, billing customer id) into a user's public
//! metadata.

pub mod clients;

//! Billing provider integration.
//!
//! Creates one Stripe customer per newly registered user, carrying the
//! identity-provider user id as correlation metadata on the Stripe side.

pub mod clients;

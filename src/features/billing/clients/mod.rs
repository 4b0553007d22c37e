mod stripe_client;

pub use stripe_client::{BillingClient, BillingCustomer, StripeClient};

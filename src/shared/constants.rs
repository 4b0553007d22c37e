// =============================================================================
// USER PUBLIC METADATA
// =============================================================================

/// Initial premium status written to a freshly provisioned user
pub const PREMIUM_STATUS_INITIAL: &str = "no";

/// Correlation metadata key attached to the Stripe customer
pub const STRIPE_METADATA_CLERK_ID_KEY: &str = "metadata[clerkId]";

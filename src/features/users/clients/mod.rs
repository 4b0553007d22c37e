mod clerk_client;

pub use clerk_client::{ClerkUserClient, IdentityClient, UserPublicMetadata};

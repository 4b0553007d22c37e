//! Storage module
//!
//! Read-only client for the remote blob listing service: fetch the full
//! descriptor list and filter it by name substring.

mod blob_client;

pub use blob_client::{BlobDescriptor, BlobStoreClient, BlobStoreError};

use crate::core::config::BlobStoreConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One stored object as reported by the listing service.
///
/// Only `name` is interpreted; every other field is carried through opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("Failed to fetch blob list: {0}")]
    Fetch(String),

    #[error("Blob listing service returned HTTP {0}")]
    Status(u16),

    #[error("Failed to decode blob list: {0}")]
    Decode(String),
}

/// Client for the remote blob listing service.
///
/// Stateless: each call is one GET with the platform-default timeout, no
/// retry. The fetched list lives only for the duration of the call.
pub struct BlobStoreClient {
    config: BlobStoreConfig,
    http_client: reqwest::Client,
}

impl BlobStoreClient {
    pub fn new(config: BlobStoreConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Fetch the full list of blob descriptors.
    pub async fn list_blobs(&self) -> Result<Vec<BlobDescriptor>, BlobStoreError> {
        let url = format!("{}/list-blobs", self.config.base_url.trim_end_matches('/'));

        tracing::debug!("Fetching blob list from {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to fetch blob list: {}", e);
            BlobStoreError::Fetch(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Blob listing service error: HTTP {}", status);
            return Err(BlobStoreError::Status(status.as_u16()));
        }

        response.json::<Vec<BlobDescriptor>>().await.map_err(|e| {
            tracing::error!("Failed to decode blob list: {}", e);
            BlobStoreError::Decode(e.to_string())
        })
    }

    /// Fetch the list and keep only descriptors whose name contains `query`.
    ///
    /// Matching is a case-sensitive substring test, so an empty query returns
    /// the full list. Order is preserved; failures from [`Self::list_blobs`]
    /// propagate unchanged.
    pub async fn search_blobs(&self, query: &str) -> Result<Vec<BlobDescriptor>, BlobStoreError> {
        let blobs = self.list_blobs().await?;
        Ok(filter_by_name(blobs, query))
    }
}

fn filter_by_name(blobs: Vec<BlobDescriptor>, query: &str) -> Vec<BlobDescriptor> {
    blobs
        .into_iter()
        .filter(|blob| blob.name.contains(query))
        .collect()
}

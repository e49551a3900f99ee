//! Pinecone vector store client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::error::StoreError;
use crate::models::{PineconeConfig, VectorRecord};

/// Write side of a vector index.
///
/// Upserts are at-least-once: records carry fresh ids, so retried or
/// repeated runs add records rather than replacing them.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Upsert records into the store's namespace.
    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), StoreError>;

    /// The namespace this store writes into.
    fn namespace(&self) -> &str;
}

/// Control-plane response describing an index.
#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
}

/// Client for one Pinecone index and namespace.
pub struct PineconeStore {
    client: Client,
    /// Data-plane host for the index, resolved once at startup
    host: String,
    namespace: String,
    api_key: String,
}

impl PineconeStore {
    /// Connect to the configured index.
    ///
    /// Resolves the index's data-plane host through the control plane; a
    /// missing index or bad credentials fail here, before any file is read.
    pub async fn connect(config: &PineconeConfig) -> Result<Self, StoreError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("PINECONE_API_KEY").ok().filter(|k| !k.is_empty()))
            .ok_or(StoreError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let url = format!(
            "{}/indexes/{}",
            config.api_base.trim_end_matches('/'),
            config.index
        );

        let response = client
            .get(&url)
            .header("Api-Key", &api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::IndexResolution {
                index: config.index.clone(),
                reason: format!("status {status}: {body}"),
            });
        }

        let description: IndexDescription =
            response.json().await.map_err(|e| StoreError::IndexResolution {
                index: config.index.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            host: description.host,
            namespace: config.namespace.clone(),
            api_key,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

#[async_trait]
impl VectorStore for PineconeStore {
    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let url = format!("https://{}/vectors/upsert", self.host);
        let body = json!({
            "vectors": records,
            "namespace": self.namespace,
        });

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::UpsertError { status, body });
        }

        Ok(())
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}

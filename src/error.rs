//! Error types for the ingestion pipeline.

use thiserror::Error;

use crate::utils::retry::Retryable;

/// Errors raised while discovering files to ingest.
///
/// Discovery failure is fatal: the run terminates without processing any file.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("docs directory not found: {0}")]
    RootNotFound(String),

    #[error("directory walk error: {0}")]
    WalkError(String),

    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Errors raised while loading one document from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file exceeds maximum size: {size} > {max_size} bytes")]
    TooLarge { size: u64, max_size: u64 },
}

/// Errors raised by the remote embedding API.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("embedding API error (status {status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),

    #[error("embedding request timed out")]
    Timeout,

    #[error("missing embedding API key: set OPENAI_API_KEY")]
    MissingApiKey,
}

impl Retryable for EmbeddingError {
    fn is_retryable(&self) -> bool {
        match self {
            EmbeddingError::Timeout => true,
            EmbeddingError::RequestError(e) => e.is_timeout() || e.is_connect(),
            // 429 and 5xx are transient; auth and malformed requests are not
            EmbeddingError::ApiError { status, .. } => *status == 429 || *status >= 500,
            EmbeddingError::InvalidResponse(_) | EmbeddingError::MissingApiKey => false,
        }
    }
}

/// Errors raised by the remote vector store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("vector store request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("failed to resolve index '{index}': {reason}")]
    IndexResolution { index: String, reason: String },

    #[error("upsert error (status {status}): {body}")]
    UpsertError { status: u16, body: String },

    #[error("missing vector store API key: set PINECONE_API_KEY")]
    MissingApiKey,

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}

impl Retryable for StoreError {
    fn is_retryable(&self) -> bool {
        match self {
            StoreError::RequestError(e) => e.is_timeout() || e.is_connect(),
            StoreError::UpsertError { status, .. } => *status == 429 || *status >= 500,
            StoreError::Embedding(e) => e.is_retryable(),
            StoreError::IndexResolution { .. } | StoreError::MissingApiKey => false,
        }
    }
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Per-file ingestion errors, caught at the orchestrator's file boundary.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

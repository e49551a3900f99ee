use serde::{Deserialize, Serialize};

pub const DEFAULT_EMBEDDING_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_PINECONE_API_BASE: &str = "https://api.pinecone.io";
pub const DEFAULT_INDEX: &str = "docs";
pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub pinecone: PineconeConfig,

    #[serde(default)]
    pub ingest: IngestConfig,
}

impl Config {
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|p| p.join("docingest").join("config.toml"))
    }

    pub fn load() -> Result<Self, crate::error::ConfigError> {
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            return Ok(config);
        }
        Ok(Self::default())
    }

    /// Validate the configuration once, at startup.
    pub fn validate(&self) -> Result<(), crate::error::ConfigError> {
        use crate::error::ConfigError;

        if self.ingest.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.ingest.chunk_overlap >= self.ingest.chunk_size {
            return Err(ConfigError::ValidationError(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.ingest.chunk_overlap, self.ingest.chunk_size
            )));
        }
        if self.pinecone.index.is_empty() {
            return Err(ConfigError::ValidationError(
                "pinecone index name must not be empty".to_string(),
            ));
        }
        if self.pinecone.namespace.is_empty() {
            return Err(ConfigError::ValidationError(
                "pinecone namespace must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_api_base")]
    pub api_base: String,

    #[serde(default = "default_embedding_model")]
    pub model: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// API key override; when absent the OPENAI_API_KEY environment
    /// variable is read at client construction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_embedding_api_base() -> String {
    DEFAULT_EMBEDDING_API_BASE.to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_batch_size() -> u32 {
    64
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_base: default_embedding_api_base(),
            model: default_embedding_model(),
            timeout_secs: default_timeout(),
            batch_size: default_batch_size(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PineconeConfig {
    #[serde(default = "default_pinecone_api_base")]
    pub api_base: String,

    #[serde(default = "default_index")]
    pub index: String,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// API key override; when absent the PINECONE_API_KEY environment
    /// variable is read at client construction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_pinecone_api_base() -> String {
    DEFAULT_PINECONE_API_BASE.to_string()
}

fn default_index() -> String {
    DEFAULT_INDEX.to_string()
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            api_base: default_pinecone_api_base(),
            index: default_index(),
            namespace: default_namespace(),
            timeout_secs: default_timeout(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory scanned for documents.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    /// Glob pattern matched against paths below the docs directory.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Maximum chunk size in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u32,

    /// Overlap between consecutive chunks in characters.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: u32,

    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Retry attempts for embedding and upsert calls.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_docs_dir() -> String {
    "docs".to_string()
}

fn default_pattern() -> String {
    "**/*.txt".to_string()
}

fn default_chunk_size() -> u32 {
    1000
}

fn default_chunk_overlap() -> u32 {
    200
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

fn default_max_retries() -> u32 {
    3
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            pattern: default_pattern(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            max_file_size: default_max_file_size(),
            max_retries: default_max_retries(),
        }
    }
}

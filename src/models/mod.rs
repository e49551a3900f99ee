mod config;
mod document;

pub use config::{
    Config, DEFAULT_EMBEDDING_API_BASE, DEFAULT_EMBEDDING_MODEL, DEFAULT_INDEX, DEFAULT_NAMESPACE,
    DEFAULT_PINECONE_API_BASE, EmbeddingConfig, IngestConfig, PineconeConfig,
};
pub use document::{Chunk, ChunkMetadata, Document, VectorRecord};

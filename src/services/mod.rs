mod batch;
mod chunker;
mod embedding;
mod ingest;
mod vector_store;

pub use batch::store_chunks;
pub use chunker::TextChunker;
pub use embedding::{Embedder, EmbeddingClient};
pub use ingest::{IngestStats, Ingestor};
pub use vector_store::{PineconeStore, VectorStore};

use serde::{Deserialize, Serialize};

/// One loaded source file, consumed whole by the chunker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub source_path: String,
    pub text: String,
}

impl Document {
    pub fn new(source_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            text: text.into(),
        }
    }
}

/// A bounded substring of a document, the unit of embedding.
///
/// Offsets are char offsets into the source text; consecutive chunks
/// overlap, so `start_offset` of a chunk is less than `end_offset` of
/// its predecessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub source_path: String,
    pub start_offset: u64,
    pub end_offset: u64,
}

impl Chunk {
    pub fn from_document(document: &Document, text: String, start: usize, end: usize) -> Self {
        Self {
            text,
            source_path: document.source_path.clone(),
            start_offset: start as u64,
            end_offset: end as u64,
        }
    }

    pub fn metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            text: self.text.clone(),
            source: self.source_path.clone(),
        }
    }
}

/// Flat metadata payload stored alongside each vector.
///
/// The chunk text lives under the `text` key so downstream retrieval can
/// return the passage without a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub text: String,
    pub source: String,
}

/// One (vector, metadata) pair as sent to the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: ChunkMetadata,
}

impl VectorRecord {
    /// Build a record from a chunk and its embedding.
    ///
    /// Ids are fresh v4 UUIDs, so re-ingesting the same files produces new
    /// records rather than overwriting earlier ones.
    pub fn from_chunk(chunk: &Chunk, values: Vec<f32>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            values,
            metadata: chunk.metadata(),
        }
    }
}

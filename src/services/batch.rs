//! Embed-then-upsert of one file's chunks.

use crate::error::{EmbeddingError, IngestError};
use crate::models::{Chunk, VectorRecord};
use crate::services::{Embedder, VectorStore};
use crate::utils::retry::{RetryConfig, with_retry};

/// Embed every chunk and upsert the resulting records, in order.
///
/// Makes no remote call when `chunks` is empty. Transient embedding and
/// upsert failures are retried per the retry configuration; the final
/// error propagates to the caller's per-file boundary.
pub async fn store_chunks(
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
    chunks: &[Chunk],
    retry: &RetryConfig,
) -> Result<(), IngestError> {
    if chunks.is_empty() {
        return Ok(());
    }

    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();

    let embeddings = with_retry(retry, || embedder.embed_batch(texts.clone())).await?;

    if embeddings.len() != chunks.len() {
        return Err(EmbeddingError::InvalidResponse(format!(
            "expected {} embeddings, got {}",
            chunks.len(),
            embeddings.len()
        ))
        .into());
    }

    let records: Vec<VectorRecord> = chunks
        .iter()
        .zip(embeddings)
        .map(|(chunk, values)| VectorRecord::from_chunk(chunk, values))
        .collect();

    with_retry(retry, || store.upsert(records.clone())).await?;

    Ok(())
}

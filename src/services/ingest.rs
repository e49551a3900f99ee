//! Ingestion orchestrator: drives the per-file pipeline sequentially.

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{DiscoveryError, IngestError};
use crate::models::IngestConfig;
use crate::services::{Embedder, TextChunker, VectorStore, store_chunks};
use crate::sources::LocalSource;
use crate::utils::retry::RetryConfig;

/// Counters for one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub files_found: u64,
    pub files_ingested: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub chunks_created: u64,
}

/// Runs the batch: discover, then load -> chunk -> embed -> upsert per file.
pub struct Ingestor {
    chunker: TextChunker,
    retry: RetryConfig,
    verbose: bool,
}

impl Ingestor {
    pub fn new(config: &IngestConfig, verbose: bool) -> Self {
        Self {
            chunker: TextChunker::new(config),
            retry: RetryConfig::new(config.max_retries),
            verbose,
        }
    }

    /// Ingest every discovered file, one at a time.
    ///
    /// Discovery failure is fatal and returns before any file is touched.
    /// A failure inside one file's pipeline is logged with the file's
    /// ordinal and path, and the batch moves on to the next file.
    pub async fn run(
        &self,
        source: &LocalSource,
        embedder: &dyn Embedder,
        store: &dyn VectorStore,
    ) -> Result<IngestStats, DiscoveryError> {
        let files = source.collect_files()?;
        let total = files.len();

        println!("Found {total} text files to ingest");

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut stats = IngestStats {
            files_found: total as u64,
            ..Default::default()
        };

        for (i, path) in files.iter().enumerate() {
            let ordinal = i + 1;
            let display = path.to_string_lossy();
            pb.println(format!("Ingesting file {ordinal} of {total}: {display}"));

            match self.ingest_file(source, embedder, store, path).await {
                Ok(0) => {
                    stats.files_skipped += 1;
                    if self.verbose {
                        pb.println(format!(
                            "Skipped file {ordinal} of {total} (no content): {display}"
                        ));
                    }
                }
                Ok(chunks) => {
                    stats.files_ingested += 1;
                    stats.chunks_created += chunks;
                    pb.println(format!("Ingested file {ordinal} of {total}: {display}"));
                }
                Err(e) => {
                    stats.files_failed += 1;
                    pb.println(format!(
                        "Failed to ingest file {ordinal} of {total}: {display}: {e}"
                    ));
                }
            }

            pb.inc(1);
        }

        pb.finish_and_clear();
        println!("Ingestion complete");

        Ok(stats)
    }

    /// One file's pipeline. Returns the number of chunks stored.
    async fn ingest_file(
        &self,
        source: &LocalSource,
        embedder: &dyn Embedder,
        store: &dyn VectorStore,
        path: &std::path::Path,
    ) -> Result<u64, IngestError> {
        let document = source.read_document(path)?;
        let chunks = self.chunker.chunk(&document);

        if chunks.is_empty() {
            return Ok(0);
        }

        store_chunks(embedder, store, &chunks, &self.retry).await?;

        Ok(chunks.len() as u64)
    }
}

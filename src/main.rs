use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use docingest::models::Config;
use docingest::services::{EmbeddingClient, IngestStats, Ingestor, PineconeStore};
use docingest::sources::LocalSource;

/// Batch-ingest text documents into a Pinecone vector index.
#[derive(Debug, Parser)]
#[command(name = "docingest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to ingest (defaults to the configured docs directory)
    #[arg(long)]
    docs_dir: Option<PathBuf>,

    /// List the files that would be ingested without calling any remote API
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Per-file failures are already handled inside the run; anything that
    // reaches here (config, client setup, discovery) is logged once and the
    // process still exits 0, matching the batch-script contract.
    if let Err(e) = run(cli).await {
        eprintln!("{} {e:#}", style("Failed to ingest your data:").red().bold());
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let root = cli
        .docs_dir
        .unwrap_or_else(|| PathBuf::from(&config.ingest.docs_dir));
    let source = LocalSource::new(root, &config.ingest);

    if cli.dry_run {
        let files = source.collect_files().context("file discovery failed")?;
        println!("Dry run: would ingest {} files", files.len());
        for file in &files {
            println!("  {}", file.display());
        }
        return Ok(());
    }

    let embedder =
        EmbeddingClient::new(&config.embedding).context("failed to create embedding client")?;
    let store = PineconeStore::connect(&config.pinecone)
        .await
        .context("failed to connect to vector store")?;

    if cli.verbose {
        println!(
            "Ingesting into index '{}' namespace '{}' with model '{}'",
            config.pinecone.index, config.pinecone.namespace, embedder.model()
        );
    }

    let ingestor = Ingestor::new(&config.ingest, cli.verbose);
    let stats = ingestor
        .run(&source, &embedder, &store)
        .await
        .context("file discovery failed")?;

    print_summary(&stats);

    Ok(())
}

fn print_summary(stats: &IngestStats) {
    println!(
        "{} {} ingested, {} skipped, {} failed ({} chunks)",
        style("Done:").green().bold(),
        stats.files_ingested,
        stats.files_skipped,
        stats.files_failed,
        stats.chunks_created,
    );
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Build a vector store from a parsed-blocks file and run one query

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dotenv::dotenv;

use finax_retrieval::{CohereClient, JsonBlocksSource, RetrievalConfig, Vectorstore};

#[derive(Debug, Parser)]
#[command(name = "retrieve", about = "Retrieve document chunks relevant to a query")]
struct Args {
    /// JSON file of parsed structural blocks for one document
    #[arg(long)]
    blocks: PathBuf,

    /// Document title applied to every chunk
    #[arg(long)]
    title: String,

    /// Source document URL applied to every chunk
    #[arg(long)]
    url: String,

    /// The query to retrieve for
    query: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let config = RetrievalConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid retrieval configuration: {}", e))?;

    let cohere = Arc::new(CohereClient::from_env(&config));
    if !finax_retrieval::EmbeddingProvider::is_available(cohere.as_ref()) {
        bail!("COHERE_API_KEY not set in environment variables");
    }

    let mut source = JsonBlocksSource::from_path(&args.blocks, &args.title, &args.url)
        .with_context(|| format!("Failed to load blocks from {}", args.blocks.display()))?;

    let mut store = Vectorstore::new(config, cohere.clone(), cohere);
    store
        .build(&mut source)
        .await
        .context("Failed to build vector store")?;

    let results = store
        .retrieve(&args.query)
        .await
        .context("Retrieval failed")?;

    if results.is_empty() {
        println!("No relevant chunks found.");
        return Ok(());
    }

    for (rank, chunk) in results.iter().enumerate() {
        println!("{}. [{}] {}", rank + 1, chunk.title, chunk.url);
        println!("   {}\n", chunk.text);
    }

    Ok(())
}

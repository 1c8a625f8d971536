// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Batching embedder over a pluggable provider
//!
//! Splits corpus embedding into fixed-size batches to respect provider
//! request-size limits. Batches are issued sequentially and results
//! concatenated in input order; batch boundaries never affect output
//! order or values.

use std::sync::Arc;

use tracing::debug;

use crate::chunks::DocChunk;
use crate::providers::ProviderError;

use super::provider::{EmbeddingProvider, InputType};

/// Embeds chunk texts and queries through an injected provider
pub struct Embedder {
    provider: Arc<dyn EmbeddingProvider>,
    batch_size: usize,
}

impl Embedder {
    /// Create an embedder with the given batch size
    pub fn new(provider: Arc<dyn EmbeddingProvider>, batch_size: usize) -> Self {
        Self {
            provider,
            // A zero batch size would never make progress
            batch_size: batch_size.max(1),
        }
    }

    /// Embed corpus chunks with the `search_document` mode
    ///
    /// Returns exactly one vector per chunk, in chunk order.
    pub async fn embed_documents(
        &self,
        chunks: &[DocChunk],
    ) -> Result<Vec<Vec<f32>>, ProviderError> {
        let mut embeddings = Vec::with_capacity(chunks.len());

        for batch in chunks.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let batch_embeddings = self
                .provider
                .embed(&texts, InputType::SearchDocument)
                .await?;

            if batch_embeddings.len() != texts.len() {
                return Err(ProviderError::MalformedResponse {
                    message: format!(
                        "embedding count mismatch: sent {} texts, got {} vectors",
                        texts.len(),
                        batch_embeddings.len()
                    ),
                });
            }

            embeddings.extend(batch_embeddings);
        }

        debug!(
            provider = self.provider.name(),
            chunks = chunks.len(),
            batch_size = self.batch_size,
            "Embedded document chunks"
        );

        Ok(embeddings)
    }

    /// Embed a single query with the `search_query` mode
    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>, ProviderError> {
        let texts = [query.to_string()];
        let mut embeddings = self.provider.embed(&texts, InputType::SearchQuery).await?;

        if embeddings.len() != 1 {
            return Err(ProviderError::MalformedResponse {
                message: format!(
                    "embedding count mismatch: sent 1 query, got {} vectors",
                    embeddings.len()
                ),
            });
        }

        Ok(embeddings.remove(0))
    }
}

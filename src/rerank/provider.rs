// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Rerank provider trait definition
//!
//! Reranking is a refinement stage: it receives the dense-search
//! candidate set, not the whole corpus, and reorders it with a scorer
//! that is more accurate and more expensive than dense retrieval.

use async_trait::async_trait;

use crate::chunks::DocChunk;
use crate::providers::ProviderError;

/// One reranked candidate
#[derive(Debug, Clone, PartialEq)]
pub struct RankedHit {
    /// Position of the candidate in the input document slice
    pub index: usize,
    /// Relevance score assigned by the scoring model
    pub relevance_score: f32,
}

/// Trait for rerank providers
#[async_trait]
pub trait RerankProvider: Send + Sync {
    /// Rerank candidates against a query
    ///
    /// # Arguments
    /// * `query` - The user query
    /// * `documents` - Candidate chunks, positional correspondence is
    ///   the caller's join key back to corpus IDs
    /// * `top_n` - Maximum number of hits to return
    /// * `rank_fields` - Chunk attributes visible to the scoring model
    ///
    /// # Returns
    /// At most `top_n` hits, strictly ordered by descending relevance.
    /// An empty candidate slice must return an empty Vec without a
    /// provider call.
    async fn rerank(
        &self,
        query: &str,
        documents: &[DocChunk],
        top_n: usize,
        rank_fields: &[&str],
    ) -> Result<Vec<RankedHit>, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider is available (has API key, etc.)
    fn is_available(&self) -> bool;
}

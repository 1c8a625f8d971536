// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Embedding provider trait definition

use async_trait::async_trait;
use serde::Serialize;

use crate::providers::ProviderError;

/// Embedding call mode, passed through to the provider
///
/// Asymmetric embedding models encode corpus documents and queries
/// differently; corpus chunks must be embedded with `SearchDocument`
/// at build time and queries with `SearchQuery` at retrieval time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    /// Corpus chunk embedded at build time
    SearchDocument,
    /// User query embedded at retrieval time
    SearchQuery,
}

impl InputType {
    /// Wire representation of the flag
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::SearchDocument => "search_document",
            InputType::SearchQuery => "search_query",
        }
    }
}

/// Trait for embedding providers
///
/// Implementations map texts to fixed-dimension dense vectors. The
/// result must be length- and order-preserving with respect to the
/// input. Network-backed implementations may fail or rate-limit;
/// errors propagate to the caller.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts
    ///
    /// # Arguments
    /// * `texts` - Texts to embed, order-significant
    /// * `input_type` - Corpus-document or query encoding mode
    ///
    /// # Returns
    /// One vector per input text, in input order
    async fn embed(
        &self,
        texts: &[String],
        input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider is available (has API key, etc.)
    fn is_available(&self) -> bool;
}

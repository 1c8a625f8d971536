// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the retrieval pipeline

use std::env;

/// Configuration for the retrieval pipeline
///
/// Defaults match the production deployment: 1024-dimensional
/// multilingual embeddings, dense top-10 candidates narrowed to the
/// top-5 by the reranker.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Number of dense-search candidates fed to the reranker
    pub retrieve_top_k: usize,
    /// Maximum number of reranked results returned by `retrieve`
    pub rerank_top_k: usize,
    /// Texts per embedding request (provider request-size limit)
    pub embed_batch_size: usize,
    /// Embedding dimensionality
    pub embedding_dim: usize,
    /// HNSW ef parameter during index construction
    pub ef_construction: usize,
    /// HNSW maximum connections per layer (M parameter)
    pub max_connections: usize,
    /// Embedding model identifier
    pub embed_model: String,
    /// Rerank model identifier
    pub rerank_model: String,
    /// Provider request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum retries for transient provider failures
    pub max_retries: u32,
}

impl RetrievalConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            retrieve_top_k: env::var("RETRIEVE_TOP_K")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retrieve_top_k),
            rerank_top_k: env::var("RERANK_TOP_K")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rerank_top_k),
            embed_batch_size: env::var("EMBED_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.embed_batch_size),
            embedding_dim: env::var("EMBEDDING_DIM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.embedding_dim),
            ef_construction: env::var("HNSW_EF_CONSTRUCTION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ef_construction),
            max_connections: env::var("HNSW_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            embed_model: env::var("EMBED_MODEL").unwrap_or(defaults.embed_model),
            rerank_model: env::var("RERANK_MODEL").unwrap_or(defaults.rerank_model),
            request_timeout_ms: env::var("PROVIDER_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            max_retries: env::var("PROVIDER_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.retrieve_top_k == 0 {
            return Err("retrieve_top_k must be greater than 0".to_string());
        }
        if self.rerank_top_k == 0 {
            return Err("rerank_top_k must be greater than 0".to_string());
        }
        if self.embed_batch_size == 0 {
            return Err("embed_batch_size must be greater than 0".to_string());
        }
        if self.embedding_dim == 0 {
            return Err("embedding_dim must be greater than 0".to_string());
        }
        if self.max_connections == 0 {
            return Err("max_connections must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            retrieve_top_k: 10,
            rerank_top_k: 5,
            embed_batch_size: 90,
            embedding_dim: 1024,
            ef_construction: 512,
            max_connections: 64,
            embed_model: "embed-multilingual-v3.0".to_string(),
            rerank_model: "rerank-multilingual-v3.0".to_string(),
            request_timeout_ms: 30_000,
            max_retries: 3,
        }
    }
}

/// Credentials and endpoint for the Cohere provider
#[derive(Debug, Clone)]
pub struct CohereConfig {
    /// API key (empty means unavailable)
    pub api_key: String,
    /// API base URL
    pub base_url: String,
}

impl CohereConfig {
    /// Load from environment (COHERE_API_KEY, COHERE_BASE_URL)
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("COHERE_API_KEY").unwrap_or_default(),
            base_url: env::var("COHERE_BASE_URL")
                .unwrap_or_else(|_| "https://api.cohere.com".to_string()),
        }
    }

    /// Check whether an API key is configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

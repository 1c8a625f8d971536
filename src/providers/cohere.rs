// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cohere embedding and rerank provider
//!
//! One HTTP client implements both provider traits, since both calls
//! share credentials and endpoint. The client is injected into the
//! store at construction; nothing here is process-global.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::chunks::DocChunk;
use crate::config::{CohereConfig, RetrievalConfig};
use crate::embeddings::{EmbeddingProvider, InputType};
use crate::rerank::{RankedHit, RerankProvider};

use super::error::ProviderError;
use super::retry::with_retry;

const EMBED_PATH: &str = "/v1/embed";
const RERANK_PATH: &str = "/v1/rerank";

/// Cohere API client implementing embedding and rerank
pub struct CohereClient {
    api_key: String,
    base_url: String,
    client: Client,
    embed_model: String,
    rerank_model: String,
    timeout_ms: u64,
    max_retries: u32,
}

impl CohereClient {
    /// Create a new Cohere client
    pub fn new(cohere: &CohereConfig, retrieval: &RetrievalConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(retrieval.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: cohere.api_key.clone(),
            base_url: cohere.base_url.trim_end_matches('/').to_string(),
            client,
            embed_model: retrieval.embed_model.clone(),
            rerank_model: retrieval.rerank_model.clone(),
            timeout_ms: retrieval.request_timeout_ms,
            max_retries: retrieval.max_retries,
        }
    }

    /// Create a client from environment configuration
    pub fn from_env(retrieval: &RetrievalConfig) -> Self {
        Self::new(&CohereConfig::from_env(), retrieval)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        if self.api_key.is_empty() {
            return Err(ProviderError::NoApiKey {
                provider: "cohere".to_string(),
            });
        }

        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    ProviderError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();

        if status == 429 {
            let retry_after_secs = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(ProviderError::RateLimited { retry_after_secs });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::NoApiKey {
                provider: "cohere".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse {
                message: format!("JSON parse error: {}", e),
            })
    }
}

#[async_trait]
impl EmbeddingProvider for CohereClient {
    async fn embed(
        &self,
        texts: &[String],
        input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, ProviderError> {
        let body = EmbedRequest {
            model: &self.embed_model,
            texts,
            input_type,
        };

        let data: EmbedResponse = with_retry("cohere", self.max_retries, || {
            self.post_json(EMBED_PATH, &body)
        })
        .await?;

        if data.embeddings.len() != texts.len() {
            return Err(ProviderError::MalformedResponse {
                message: format!(
                    "sent {} texts, got {} embeddings",
                    texts.len(),
                    data.embeddings.len()
                ),
            });
        }

        Ok(data.embeddings)
    }

    fn name(&self) -> &'static str {
        "cohere"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[async_trait]
impl RerankProvider for CohereClient {
    async fn rerank(
        &self,
        query: &str,
        documents: &[DocChunk],
        top_n: usize,
        rank_fields: &[&str],
    ) -> Result<Vec<RankedHit>, ProviderError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let body = RerankRequest {
            model: &self.rerank_model,
            query,
            documents,
            top_n,
            rank_fields,
        };

        let data: RerankResponse = with_retry("cohere", self.max_retries, || {
            self.post_json(RERANK_PATH, &body)
        })
        .await?;

        let mut hits = Vec::with_capacity(data.results.len());
        for result in data.results {
            if result.index >= documents.len() {
                return Err(ProviderError::MalformedResponse {
                    message: format!(
                        "rerank index {} out of range for {} documents",
                        result.index,
                        documents.len()
                    ),
                });
            }
            hits.push(RankedHit {
                index: result.index,
                relevance_score: result.relevance_score,
            });
        }

        hits.truncate(top_n);
        Ok(hits)
    }

    fn name(&self) -> &'static str {
        "cohere"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: &'a [String],
    input_type: InputType,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [DocChunk],
    top_n: usize,
    rank_fields: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct RerankResponse {
    results: Vec<RerankResultEntry>,
}

#[derive(Debug, Deserialize)]
struct RerankResultEntry {
    index: usize,
    relevance_score: f32,
}

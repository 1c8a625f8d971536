// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Retrieval orchestrator
//!
//! Owns the full pipeline: load -> embed -> index at build time,
//! dense search -> rerank at query time. Providers are injected at
//! construction so tests can substitute doubles; the build phase is an
//! explicit call whose failure is returned to the caller instead of
//! aborting startup.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chunks::{load_chunks, DocChunk, DocumentSource};
use crate::config::RetrievalConfig;
use crate::embeddings::{Embedder, EmbeddingProvider};
use crate::index::{HnswParams, VectorIndex};
use crate::rerank::RerankProvider;

use super::errors::RetrievalError;
use super::table::ChunkTable;

/// Chunk attributes visible to the rerank scoring model
pub const RANK_FIELDS: [&str; 2] = ["title", "text"];

/// Build-phase state, transitioned strictly in order exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Nothing loaded yet
    Unloaded,
    /// Chunks loaded from the document source
    Chunked,
    /// Embeddings computed for all chunks
    Embedded,
    /// Index built; the store serves queries for its remaining lifetime
    Indexed,
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildState::Unloaded => "unloaded",
            BuildState::Chunked => "chunked",
            BuildState::Embedded => "embedded",
            BuildState::Indexed => "indexed",
        };
        f.write_str(name)
    }
}

/// Vector store composing dense retrieval and reranking
///
/// After `build` reaches `Indexed` the store is immutable; `retrieve`
/// takes `&self` and is safe to call concurrently.
pub struct Vectorstore {
    config: RetrievalConfig,
    embedder: Embedder,
    reranker: Arc<dyn RerankProvider>,
    table: ChunkTable,
    index: Option<VectorIndex>,
    state: BuildState,
}

impl Vectorstore {
    /// Create an unbuilt store with injected providers
    pub fn new(
        config: RetrievalConfig,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        rerank_provider: Arc<dyn RerankProvider>,
    ) -> Self {
        let embedder = Embedder::new(embedding_provider, config.embed_batch_size);
        Self {
            config,
            embedder,
            reranker: rerank_provider,
            table: ChunkTable::new(),
            index: None,
            state: BuildState::Unloaded,
        }
    }

    /// Current build-phase state
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Number of chunks loaded into the store
    pub fn chunk_count(&self) -> usize {
        self.table.len()
    }

    /// Run the build phase: load, embed, and index the document
    ///
    /// Must be called exactly once. A source yielding zero chunks is
    /// not an error; the store becomes queryable and always returns
    /// empty results.
    ///
    /// # Errors
    /// * `AlreadyBuilt` if the build phase already ran
    /// * `Provider` if an embedding call fails
    /// * `CapacityMismatch` / `DimensionMismatch` / `InvalidVector` on
    ///   indexing failures
    pub async fn build<S: DocumentSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<(), RetrievalError> {
        if self.state != BuildState::Unloaded {
            return Err(RetrievalError::AlreadyBuilt { state: self.state });
        }

        info!("Loading document chunks");
        let chunks = load_chunks(source);
        self.table.set_chunks(chunks);
        self.state = BuildState::Chunked;

        if self.table.is_empty() {
            warn!("Document source yielded no chunks; store will serve empty results");
            self.table.attach_embeddings(Vec::new())?;
            self.state = BuildState::Embedded;
            self.index = Some(VectorIndex::build(
                &[],
                0,
                self.config.embedding_dim,
                &self.hnsw_params(),
            )?);
            self.state = BuildState::Indexed;
            return Ok(());
        }

        info!(count = self.table.len(), "Embedding document chunks");
        let embeddings = self.embedder.embed_documents(self.table.chunks()).await?;
        self.table.attach_embeddings(embeddings)?;
        self.state = BuildState::Embedded;

        info!(count = self.table.len(), "Indexing document chunks");
        let index = VectorIndex::build(
            self.table.embeddings(),
            self.table.len(),
            self.config.embedding_dim,
            &self.hnsw_params(),
        )?;
        info!(elements = index.len(), "Indexing complete");
        self.index = Some(index);
        self.state = BuildState::Indexed;

        Ok(())
    }

    /// Retrieve the chunks most relevant to a query
    ///
    /// Dense-searches the index for `retrieve_top_k` candidates, then
    /// reranks them and returns at most `rerank_top_k` chunks in
    /// descending relevance order. Every returned chunk comes from the
    /// dense candidate set.
    ///
    /// # Errors
    /// * `IndexNotReady` if called before the build phase finished
    /// * `Provider` if an embedding or rerank call fails
    pub async fn retrieve(&self, query: &str) -> Result<Vec<DocChunk>, RetrievalError> {
        let index = match (&self.index, self.state) {
            (Some(index), BuildState::Indexed) => index,
            _ => return Err(RetrievalError::IndexNotReady { state: self.state }),
        };

        // Empty corpus: queryable, always empty, no provider calls
        if self.table.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed_query(query).await?;

        let hits = index.search(&query_embedding, self.config.retrieve_top_k)?;
        let doc_ids: Vec<usize> = hits.iter().map(|(id, _)| *id).collect();
        debug!(candidates = doc_ids.len(), "Dense retrieval complete");

        let candidates: Vec<DocChunk> = doc_ids
            .iter()
            .filter_map(|&id| self.table.chunk(id).cloned())
            .collect();
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let ranked = self
            .reranker
            .rerank(query, &candidates, self.config.rerank_top_k, &RANK_FIELDS)
            .await?;
        debug!(reranked = ranked.len(), "Rerank complete");

        // Map reranked positions back through the candidate ID list to
        // the original chunk content, in reranked order
        let mut retrieved = Vec::with_capacity(ranked.len());
        for hit in &ranked {
            if let Some(&doc_id) = doc_ids.get(hit.index) {
                if let Some(chunk) = self.table.chunk(doc_id) {
                    retrieved.push(chunk.clone());
                }
            }
        }
        retrieved.truncate(self.config.rerank_top_k);

        Ok(retrieved)
    }

    fn hnsw_params(&self) -> HnswParams {
        HnswParams {
            ef_construction: self.config.ef_construction,
            max_connections: self.config.max_connections,
        }
    }
}

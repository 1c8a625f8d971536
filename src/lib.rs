// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod chunks;
pub mod config;
pub mod edinet;
pub mod embeddings;
pub mod index;
pub mod providers;
pub mod rerank;
pub mod retrieval;

// Re-export main types
pub use chunks::{DocChunk, DocumentSource, JsonBlocksSource, MemorySource};
pub use config::{CohereConfig, RetrievalConfig};
pub use embeddings::{Embedder, EmbeddingProvider, InputType};
pub use index::{HnswParams, VectorIndex};
pub use providers::{CohereClient, ProviderError};
pub use rerank::{RankedHit, RerankProvider};
pub use retrieval::{BuildState, ChunkTable, RetrievalError, Vectorstore};

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for store building and retrieval
//!
//! An empty document source is deliberately NOT an error: the store
//! proceeds to an empty, queryable state that always returns empty
//! results.

use thiserror::Error;

use super::vectorstore::BuildState;
use crate::providers::ProviderError;

/// Errors that can occur while building the store or retrieving
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Embedding or rerank provider call failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Vector count does not equal the declared index capacity
    #[error("Index capacity mismatch: declared {declared}, supplied {supplied} vectors")]
    CapacityMismatch {
        /// Capacity the index was declared for
        declared: usize,
        /// Vectors actually supplied
        supplied: usize,
    },

    /// `retrieve` called before the build phase reached `Indexed`
    #[error("Index not ready: store is in state {state}")]
    IndexNotReady {
        /// Build state the store was in
        state: BuildState,
    },

    /// `build` called on a store that already ran its build phase
    #[error("Build already ran (state: {state}); use a fresh store to re-index")]
    AlreadyBuilt {
        /// Build state the store was in
        state: BuildState,
    },

    /// Embedding dimensionality differs from the configured dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Configured dimensionality
        expected: usize,
        /// Observed dimensionality
        actual: usize,
    },

    /// Embedding contains NaN or Infinity values
    #[error("Vector {id} contains NaN or Infinity values")]
    InvalidVector {
        /// Positional ID of the offending vector
        id: usize,
    },

    /// Chunk and embedding columns fell out of alignment
    #[error("Table misalignment: {chunks} chunks but {embeddings} embeddings")]
    TableMisaligned {
        /// Chunk column length
        chunks: usize,
        /// Embedding column length
        embeddings: usize,
    },
}

impl RetrievalError {
    /// Get error code for logging and metrics
    pub fn error_code(&self) -> &'static str {
        match self {
            RetrievalError::Provider(e) => e.error_code(),
            RetrievalError::CapacityMismatch { .. } => "CAPACITY_MISMATCH",
            RetrievalError::IndexNotReady { .. } => "INDEX_NOT_READY",
            RetrievalError::AlreadyBuilt { .. } => "ALREADY_BUILT",
            RetrievalError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            RetrievalError::InvalidVector { .. } => "INVALID_VECTOR",
            RetrievalError::TableMisaligned { .. } => "TABLE_MISALIGNED",
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            RetrievalError::Provider(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Get user-friendly error message for interactive surfaces
    pub fn user_message(&self) -> String {
        match self {
            RetrievalError::Provider(_) => {
                "Couldn't retrieve information right now - please try again".to_string()
            }
            RetrievalError::IndexNotReady { .. } => {
                "The document index is still being built".to_string()
            }
            _ => self.to_string(),
        }
    }
}

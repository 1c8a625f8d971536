// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Single owned table joining chunks and embeddings by positional ID
//!
//! Chunk order is the sole join key between the chunk sequence, the
//! embedding sequence, and the index's element IDs. Keeping both
//! columns in one structure, with the alignment checked when the
//! embedding column is attached, prevents silent misalignment if any
//! stage reorders or filters.

use crate::chunks::DocChunk;

use super::errors::RetrievalError;

/// Parallel chunk and embedding columns keyed by positional ID
#[derive(Debug, Default)]
pub struct ChunkTable {
    chunks: Vec<DocChunk>,
    embeddings: Vec<Vec<f32>>,
}

impl ChunkTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the chunk column; embeddings attach separately
    pub fn set_chunks(&mut self, chunks: Vec<DocChunk>) {
        self.chunks = chunks;
        self.embeddings.clear();
    }

    /// Attach the embedding column, one vector per chunk in order
    ///
    /// # Errors
    /// `TableMisaligned` if the column lengths differ.
    pub fn attach_embeddings(&mut self, embeddings: Vec<Vec<f32>>) -> Result<(), RetrievalError> {
        if embeddings.len() != self.chunks.len() {
            return Err(RetrievalError::TableMisaligned {
                chunks: self.chunks.len(),
                embeddings: embeddings.len(),
            });
        }
        self.embeddings = embeddings;
        Ok(())
    }

    /// Chunk for a positional ID, if in range
    pub fn chunk(&self, id: usize) -> Option<&DocChunk> {
        self.chunks.get(id)
    }

    /// Full chunk column
    pub fn chunks(&self) -> &[DocChunk] {
        &self.chunks
    }

    /// Full embedding column
    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    /// Number of chunks in the table
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the table holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

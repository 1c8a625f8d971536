// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core chunk record type

use serde::{Deserialize, Serialize};

/// A contiguous unit of source text, the atomic retrieval item
///
/// Chunks are immutable after creation and identified by their position
/// in the store's chunk sequence. The serialized form is also the wire
/// format sent to the rerank provider, which scores the `title` and
/// `text` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocChunk {
    /// Document title (fixed per source document)
    pub title: String,
    /// Chunk text, context-preserving as emitted by the layout parser
    pub text: String,
    /// Source document URL
    pub url: String,
}

impl DocChunk {
    /// Create a new chunk record
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            url: url.into(),
        }
    }
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chunk loading from a document source

use tracing::debug;

use super::source::DocumentSource;
use super::types::DocChunk;

/// Drain a document source into an ordered chunk sequence
///
/// Produces one record per structural block, preserving source order.
/// Title and URL come from the source configuration, not from the
/// blocks. No filtering, deduplication, or size-based splitting happens
/// here. An exhausted or empty source yields an empty Vec.
pub fn load_chunks<S: DocumentSource + ?Sized>(source: &mut S) -> Vec<DocChunk> {
    let title = source.title().to_string();
    let url = source.url().to_string();

    let mut chunks = Vec::new();
    while let Some(text) = source.next_block() {
        chunks.push(DocChunk {
            title: title.clone(),
            text,
            url: url.clone(),
        });
    }

    debug!(count = chunks.len(), %title, "Loaded document chunks");
    chunks
}

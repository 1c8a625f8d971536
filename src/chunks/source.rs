// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Document source abstraction
//!
//! A `DocumentSource` hands out the structural blocks a layout parser
//! produced for one document, in source order, exactly once. Chunk
//! granularity is entirely the parser's decision; sources here only
//! carry the blocks plus the per-document title and URL.

use std::collections::VecDeque;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors reading a parsed-document file
#[derive(Debug, Error)]
pub enum SourceError {
    /// File could not be read
    #[error("Failed to read blocks file: {0}")]
    Io(#[from] std::io::Error),

    /// File contents were not valid blocks JSON
    #[error("Failed to parse blocks file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A lazy, finite, one-pass sequence of structural text blocks
///
/// Supplied once at store construction. An exhausted or empty source is
/// not an error; it yields an empty chunk sequence downstream.
pub trait DocumentSource: Send {
    /// Document title applied to every chunk
    fn title(&self) -> &str;

    /// Source URL applied to every chunk
    fn url(&self) -> &str;

    /// Next structural block as plain text, or None when exhausted
    fn next_block(&mut self) -> Option<String>;
}

/// In-memory document source
///
/// Used by tests and as the backing store for sources that read their
/// blocks eagerly from disk.
#[derive(Debug)]
pub struct MemorySource {
    title: String,
    url: String,
    blocks: VecDeque<String>,
}

impl MemorySource {
    /// Create a source from pre-chunked blocks
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        blocks: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            blocks: blocks.into(),
        }
    }
}

impl DocumentSource for MemorySource {
    fn title(&self) -> &str {
        &self.title
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn next_block(&mut self) -> Option<String> {
        self.blocks.pop_front()
    }
}

/// One structural block in a parsed-document file
///
/// Accepts either a bare string or an object with a `text` field, so
/// both plain block lists and richer parser exports load unchanged.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BlockRecord {
    Text(String),
    Object { text: String },
}

impl BlockRecord {
    fn into_text(self) -> String {
        match self {
            BlockRecord::Text(text) => text,
            BlockRecord::Object { text } => text,
        }
    }
}

/// Document source backed by a JSON file of parsed structural blocks
#[derive(Debug)]
pub struct JsonBlocksSource {
    inner: MemorySource,
}

impl JsonBlocksSource {
    /// Load a blocks file produced by an upstream layout parser
    ///
    /// # Arguments
    /// * `path` - JSON file holding an array of blocks
    /// * `title` - Title applied to every chunk
    /// * `url` - Source URL applied to every chunk
    pub fn from_path(
        path: impl AsRef<Path>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<BlockRecord> = serde_json::from_str(&raw)?;
        let blocks = records.into_iter().map(BlockRecord::into_text).collect();

        Ok(Self {
            inner: MemorySource::new(title, url, blocks),
        })
    }
}

impl DocumentSource for JsonBlocksSource {
    fn title(&self) -> &str {
        self.inner.title()
    }

    fn url(&self) -> &str {
        self.inner.url()
    }

    fn next_block(&mut self) -> Option<String> {
        self.inner.next_block()
    }
}

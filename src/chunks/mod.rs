// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Document chunk model and loading

pub mod loader;
pub mod source;
pub mod types;

pub use loader::load_chunks;
pub use source::{DocumentSource, JsonBlocksSource, MemorySource, SourceError};
pub use types::DocChunk;

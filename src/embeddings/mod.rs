// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Embedding provider trait and batching embedder

pub mod embedder;
pub mod provider;

pub use embedder::Embedder;
pub use provider::{EmbeddingProvider, InputType};

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Approximate nearest-neighbor index over chunk embeddings

pub mod hnsw;

pub use hnsw::{HnswParams, VectorIndex};

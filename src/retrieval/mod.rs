// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Retrieval orchestration: chunk table, vectorstore, errors

pub mod errors;
pub mod table;
pub mod vectorstore;

pub use errors::RetrievalError;
pub use table::ChunkTable;
pub use vectorstore::{BuildState, Vectorstore, RANK_FIELDS};

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Rerank provider trait

pub mod provider;

pub use provider::{RankedHit, RerankProvider};

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! External embedding/rerank providers

pub mod cohere;
pub mod error;
pub mod retry;

pub use cohere::CohereClient;
pub use error::ProviderError;
pub use retry::with_retry;

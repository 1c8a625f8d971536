// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! EDINET filing download client
//!
//! One-shot client for the EDINET v2 disclosure API: list the filings
//! published on a date and download their PDFs. This sits outside the
//! retrieval core; downloaded filings reach the core only after an
//! external layout parser turns them into a document source.

pub mod client;

pub use client::{date_range, EdinetClient, EdinetError, FilingMeta};

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HNSW index for dense retrieval
//!
//! Hierarchical Navigable Small World (HNSW) approximate nearest
//! neighbor search over an inner-product space. Embeddings arrive
//! pre-normalized from the provider, so inner product equals cosine
//! similarity. Approximate recall is acceptable here: dense search only
//! needs to surface a superset that the rerank stage then narrows.
//!
//! Element IDs are positional: vector `i` is chunk `i` in the store's
//! chunk sequence. The index is append-only and sized exactly to the
//! corpus at build time; a corpus change means a rebuild.

use hnsw_rs::hnsw::{Hnsw, Neighbour};
use hnsw_rs::prelude::*;
use tracing::{debug, info};

use crate::retrieval::RetrievalError;

/// Construction-time parameters trading recall for build/query speed
///
/// Higher values increase recall at the cost of memory and build time.
#[derive(Debug, Clone)]
pub struct HnswParams {
    /// ef parameter during graph construction
    pub ef_construction: usize,
    /// Maximum connections per layer (M parameter)
    pub max_connections: usize,
}

impl Default for HnswParams {
    fn default() -> Self {
        Self {
            ef_construction: 512,
            max_connections: 64,
        }
    }
}

/// Inner-product HNSW index with positional element IDs
///
/// Built exactly once from the complete embedding set; read-only
/// afterwards, so concurrent searches need no locking.
pub struct VectorIndex {
    hnsw: Hnsw<'static, f32, DistDot>,
    // Retained for the exact-scan fallback in `search`
    vectors: Vec<Vec<f32>>,
    len: usize,
    dimensions: usize,
}

impl VectorIndex {
    /// Build the index for exactly `capacity` elements
    ///
    /// # Arguments
    /// * `vectors` - Embeddings in chunk order; element ID i = offset i
    /// * `capacity` - Declared element count, must equal `vectors.len()`
    /// * `dimensions` - Expected embedding dimensionality
    /// * `params` - Construction parameters
    ///
    /// # Errors
    /// * `CapacityMismatch` if the vector count differs from `capacity`
    ///   (never silently truncated)
    /// * `DimensionMismatch` / `InvalidVector` on malformed embeddings
    pub fn build(
        vectors: &[Vec<f32>],
        capacity: usize,
        dimensions: usize,
        params: &HnswParams,
    ) -> Result<Self, RetrievalError> {
        if vectors.len() != capacity {
            return Err(RetrievalError::CapacityMismatch {
                declared: capacity,
                supplied: vectors.len(),
            });
        }

        for (id, vector) in vectors.iter().enumerate() {
            if vector.len() != dimensions {
                return Err(RetrievalError::DimensionMismatch {
                    expected: dimensions,
                    actual: vector.len(),
                });
            }
            if vector.iter().any(|v| !v.is_finite()) {
                return Err(RetrievalError::InvalidVector { id });
            }
        }

        // Layer count from dataset size (log2(n), clamped)
        let nb_layer = if capacity > 1 {
            ((capacity as f32).log2().ceil() as usize).clamp(4, 16)
        } else {
            4
        };

        let mut hnsw: Hnsw<f32, DistDot> = Hnsw::new(
            params.max_connections,
            capacity.max(1),
            nb_layer,
            params.ef_construction,
            DistDot,
        );

        for (id, vector) in vectors.iter().enumerate() {
            hnsw.insert((vector, id));
        }
        hnsw.set_searching_mode(true);

        info!(
            elements = capacity,
            dimensions,
            ef_construction = params.ef_construction,
            max_connections = params.max_connections,
            "Built HNSW index"
        );

        Ok(Self {
            hnsw,
            vectors: vectors.to_vec(),
            len: capacity,
            dimensions,
        })
    }

    /// Search for the k nearest elements by inner-product similarity
    ///
    /// Returns `(element_id, distance)` pairs in ascending-distance
    /// (descending-similarity) order. `k` larger than the element count
    /// is clamped to the available count rather than erroring. Always
    /// returns exactly `min(k, len)` results: the graph layer structure
    /// is randomized at build time and can miss elements on small
    /// graphs, so any element the graph walk skips is scored by exact
    /// inner product and merged in.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>, RetrievalError> {
        if query.len() != self.dimensions {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }
        if query.iter().any(|v| !v.is_finite()) {
            return Err(RetrievalError::InvalidVector { id: 0 });
        }

        if self.len == 0 || k == 0 {
            return Ok(Vec::new());
        }

        let k = k.min(self.len);
        // ef_search >= k, typically 1.5-2x k
        let ef_search = (k * 2).max(50);
        let neighbours: Vec<Neighbour> = self.hnsw.search(query, k, ef_search);

        let mut results: Vec<(usize, f32)> = neighbours
            .into_iter()
            .map(|n| (n.d_id, n.distance))
            .collect();

        if results.len() < k {
            let mut found = vec![false; self.len];
            for &(id, _) in &results {
                if let Some(slot) = found.get_mut(id) {
                    *slot = true;
                }
            }
            for (id, vector) in self.vectors.iter().enumerate() {
                if !found[id] {
                    let dot: f32 = vector.iter().zip(query).map(|(a, b)| a * b).sum();
                    results.push((id, 1.0 - dot));
                }
            }
        }

        results.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(k);

        debug!(k, returned = results.len(), "Dense search complete");
        Ok(results)
    }

    /// Number of indexed elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Embedding dimensionality
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

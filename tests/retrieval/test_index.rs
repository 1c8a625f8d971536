// Vector index contract: capacity enforcement, clamping, ordering

use finax_retrieval::index::{HnswParams, VectorIndex};
use finax_retrieval::retrieval::RetrievalError;

use super::mocks::axis;

const DIM: usize = 8;

fn params() -> HnswParams {
    HnswParams {
        ef_construction: 64,
        max_connections: 16,
    }
}

#[test]
fn test_capacity_mismatch_rejected_not_truncated() {
    // Declared for 100 elements but supplied 101: must fail, never
    // silently drop a vector
    let vectors: Vec<Vec<f32>> = (0..101).map(|i| axis(DIM, i % DIM)).collect();
    let result = VectorIndex::build(&vectors, 100, DIM, &params());

    match result {
        Err(RetrievalError::CapacityMismatch { declared, supplied }) => {
            assert_eq!(declared, 100);
            assert_eq!(supplied, 101);
        }
        other => panic!("expected CapacityMismatch, got {:?}", other.err()),
    }
}

#[test]
fn test_search_returns_descending_similarity() {
    // Graded angles toward axis 0; similarity to axis-0 query strictly
    // decreases with the angle
    let vectors: Vec<Vec<f32>> = (0..6)
        .map(|i| {
            let theta = (i as f32) * 0.3;
            let mut v = vec![0.0; DIM];
            v[0] = theta.cos();
            v[1] = theta.sin();
            v
        })
        .collect();
    let index = VectorIndex::build(&vectors, 6, DIM, &params()).unwrap();

    let results = index.search(&axis(DIM, 0), 4).unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].0, 0);
    for pair in results.windows(2) {
        assert!(pair[0].1 <= pair[1].1, "distances must ascend");
    }
}

#[test]
fn test_k_exceeding_count_is_clamped() {
    let vectors: Vec<Vec<f32>> = (0..3).map(|i| axis(DIM, i)).collect();
    let index = VectorIndex::build(&vectors, 3, DIM, &params()).unwrap();

    let results = index.search(&axis(DIM, 1), 10).unwrap();
    assert_eq!(results.len(), 3);
}

#[test]
fn test_small_corpus_search_never_drops_an_element() {
    // Layer assignment is randomized per build; on a 2-element graph a
    // bad roll can leave an element unreachable from the graph walk.
    // Every rebuild must still surface both elements.
    let mut close = vec![0.0; DIM];
    close[0] = 0.9;
    close[1] = 0.435;
    let vectors = vec![axis(DIM, 0), close];

    for _ in 0..50 {
        let index = VectorIndex::build(&vectors, 2, DIM, &params()).unwrap();
        let results = index.search(&axis(DIM, 0), 2).unwrap();

        let mut ids: Vec<usize> = results.iter().map(|r| r.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1]);
    }
}

#[test]
fn test_empty_and_singleton_indexes() {
    let empty = VectorIndex::build(&[], 0, DIM, &params()).unwrap();
    assert!(empty.search(&axis(DIM, 0), 5).unwrap().is_empty());

    let single = VectorIndex::build(&[axis(DIM, 2)], 1, DIM, &params()).unwrap();
    let results = single.search(&axis(DIM, 2), 5).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, 0);
}

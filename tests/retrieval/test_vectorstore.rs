// End-to-end retrieve-then-rerank properties over mock providers

use std::sync::Arc;

use finax_retrieval::chunks::MemorySource;
use finax_retrieval::config::RetrievalConfig;
use finax_retrieval::retrieval::{BuildState, RetrievalError, Vectorstore};

use super::mocks::{axis, KeywordEmbedder, ScriptedReranker};

const DIM: usize = 4;

fn config() -> RetrievalConfig {
    RetrievalConfig {
        embedding_dim: DIM,
        ef_construction: 64,
        max_connections: 16,
        ..RetrievalConfig::default()
    }
}

fn source(blocks: &[&str]) -> MemorySource {
    MemorySource::new(
        "Mercari Quarterly Report",
        "https://example.com/S100TDDE.pdf",
        blocks.iter().map(|b| b.to_string()).collect(),
    )
}

/// Embedder for the revenue scenario: revenue chunks and the query
/// share axis 0, the unrelated chunk sits on axis 1
fn revenue_embedder() -> Arc<KeywordEmbedder> {
    Arc::new(KeywordEmbedder::new(
        DIM,
        vec![
            ("revenue", axis(DIM, 0)),
            ("cat video", axis(DIM, 1)),
        ],
    ))
}

#[tokio::test]
async fn test_revenue_scenario_ranks_related_chunks_first() {
    let mut cfg = config();
    cfg.rerank_top_k = 2;

    let reranker = Arc::new(ScriptedReranker::new(vec![
        ("12% YoY", 0.95),
        ("10%", 0.90),
        ("cat video", 0.05),
    ]));
    let mut store = Vectorstore::new(cfg, revenue_embedder(), reranker);

    let mut src = source(&[
        "revenue grew 10%",
        "cat video transcript",
        "revenue grew 12% YoY",
    ]);
    store.build(&mut src).await.unwrap();

    let results = store.retrieve("revenue growth").await.unwrap();

    assert_eq!(results.len(), 2);
    assert!(results[0].text.contains("12% YoY"));
    assert!(results[1].text.contains("10%"));
    assert!(results.iter().all(|c| !c.text.contains("cat video")));
}

#[tokio::test]
async fn test_results_are_subset_of_dense_candidates() {
    // Six graded chunks; dense top-3 is doc0..doc2. The reranker
    // scores doc5 highest, but doc5 never reaches it: reranking
    // refines the candidate set, it cannot reach past it.
    let mut cfg = config();
    cfg.retrieve_top_k = 3;

    let table: Vec<(&str, Vec<f32>)> = vec![
        ("doc0", vec![1.0, 0.0, 0.0, 0.0]),
        ("doc1", vec![0.98, 0.198, 0.0, 0.0]),
        ("doc2", vec![0.92, 0.39, 0.0, 0.0]),
        ("doc3", vec![0.82, 0.57, 0.0, 0.0]),
        ("doc4", vec![0.70, 0.71, 0.0, 0.0]),
        ("doc5", vec![0.55, 0.83, 0.0, 0.0]),
        ("query", axis(DIM, 0)),
    ];
    let embedder = Arc::new(KeywordEmbedder::new(DIM, table));
    let reranker = Arc::new(ScriptedReranker::new(vec![
        ("doc5", 0.99),
        ("doc2", 0.80),
        ("doc0", 0.60),
        ("doc1", 0.40),
    ]));
    let mut store = Vectorstore::new(cfg, embedder, reranker);

    let mut src = source(&["doc0", "doc1", "doc2", "doc3", "doc4", "doc5"]);
    store.build(&mut src).await.unwrap();

    let results = store.retrieve("query").await.unwrap();

    assert!(!results.is_empty());
    assert!(results.len() <= 5);
    for chunk in &results {
        assert!(
            ["doc0", "doc1", "doc2"].contains(&chunk.text.as_str()),
            "chunk {} is outside the dense candidate set",
            chunk.text
        );
    }
}

#[tokio::test]
async fn test_rerank_inverts_dense_order() {
    // Dense order is [closer, further]; rerank scores invert the top-2
    let table: Vec<(&str, Vec<f32>)> = vec![
        ("closer", vec![1.0, 0.0, 0.0, 0.0]),
        ("further", vec![0.9, 0.435, 0.0, 0.0]),
        ("query", axis(DIM, 0)),
    ];
    let embedder = Arc::new(KeywordEmbedder::new(DIM, table));
    let reranker = Arc::new(ScriptedReranker::new(vec![
        ("further", 0.9),
        ("closer", 0.3),
    ]));
    let mut store = Vectorstore::new(config(), embedder, reranker);

    let mut src = source(&["closer chunk", "further chunk"]);
    store.build(&mut src).await.unwrap();

    let results = store.retrieve("query").await.unwrap();

    assert_eq!(results.len(), 2);
    assert!(results[0].text.contains("further"));
    assert!(results[1].text.contains("closer"));
}

#[tokio::test]
async fn test_retrieve_is_idempotent() {
    let reranker = Arc::new(ScriptedReranker::new(vec![("revenue", 0.9)]));
    let mut store = Vectorstore::new(config(), revenue_embedder(), reranker);

    let mut src = source(&["revenue grew 10%", "cat video transcript"]);
    store.build(&mut src).await.unwrap();

    let first = store.retrieve("revenue growth").await.unwrap();
    let second = store.retrieve("revenue growth").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_corpus_makes_no_rerank_calls() {
    let embedder = revenue_embedder();
    let reranker = Arc::new(ScriptedReranker::new(vec![]));
    let mut store = Vectorstore::new(config(), embedder.clone(), reranker.clone());

    let mut src = source(&[]);
    store.build(&mut src).await.unwrap();
    assert_eq!(store.state(), BuildState::Indexed);

    let results = store.retrieve("anything").await.unwrap();
    assert!(results.is_empty());
    assert_eq!(reranker.call_count(), 0);
    // No embedding calls either: build had nothing to embed and the
    // empty store short-circuits before embedding the query
    assert_eq!(embedder.call_count(), 0);
}

#[tokio::test]
async fn test_singleton_corpus_retrieves_without_error() {
    let reranker = Arc::new(ScriptedReranker::new(vec![("revenue", 0.9)]));
    let mut store = Vectorstore::new(config(), revenue_embedder(), reranker);

    let mut src = source(&["revenue grew 10%"]);
    store.build(&mut src).await.unwrap();

    let results = store.retrieve("revenue growth").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "revenue grew 10%");
}

#[tokio::test]
async fn test_retrieve_before_build_is_index_not_ready() {
    let store = Vectorstore::new(
        config(),
        revenue_embedder(),
        Arc::new(ScriptedReranker::new(vec![])),
    );

    let result = store.retrieve("revenue growth").await;
    match result {
        Err(RetrievalError::IndexNotReady { state }) => {
            assert_eq!(state, BuildState::Unloaded);
        }
        other => panic!("expected IndexNotReady, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_results_carry_chunk_metadata() {
    let reranker = Arc::new(ScriptedReranker::new(vec![("revenue", 0.9)]));
    let mut store = Vectorstore::new(config(), revenue_embedder(), reranker);

    let mut src = source(&["revenue grew 10%"]);
    store.build(&mut src).await.unwrap();

    let results = store.retrieve("revenue growth").await.unwrap();
    assert_eq!(results[0].title, "Mercari Quarterly Report");
    assert_eq!(results[0].url, "https://example.com/S100TDDE.pdf");
}

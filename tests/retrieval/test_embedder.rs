// Batching embedder properties: length preservation and batch-size
// invariance over the provider boundary

use std::sync::Arc;

use finax_retrieval::chunks::DocChunk;
use finax_retrieval::embeddings::Embedder;

use super::mocks::{axis, KeywordEmbedder};

fn corpus(n: usize) -> Vec<DocChunk> {
    (0..n)
        .map(|i| DocChunk::new("Report", format!("doc{} text", i), "https://example.com"))
        .collect()
}

fn embedder_with(batch_size: usize) -> (Embedder, Arc<KeywordEmbedder>) {
    let provider = Arc::new(KeywordEmbedder::new(
        4,
        vec![
            ("doc0", axis(4, 0)),
            ("doc1", axis(4, 1)),
            ("doc2", axis(4, 2)),
        ],
    ));
    (Embedder::new(provider.clone(), batch_size), provider)
}

#[tokio::test]
async fn test_embed_returns_one_vector_per_chunk() {
    let (embedder, _) = embedder_with(90);
    let docs = corpus(7);

    let embeddings = embedder.embed_documents(&docs).await.unwrap();
    assert_eq!(embeddings.len(), docs.len());
}

#[tokio::test]
async fn test_batch_size_does_not_affect_output() {
    let docs = corpus(200);

    let (one, _) = embedder_with(1);
    let (ninety, _) = embedder_with(90);
    let (full, _) = embedder_with(200);

    let a = one.embed_documents(&docs).await.unwrap();
    let b = ninety.embed_documents(&docs).await.unwrap();
    let c = full.embed_documents(&docs).await.unwrap();

    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[tokio::test]
async fn test_batches_are_issued_sequentially_per_batch_size() {
    let docs = corpus(200);

    let (embedder, provider) = embedder_with(90);
    embedder.embed_documents(&docs).await.unwrap();
    // 200 texts at batch size 90 -> 90 + 90 + 20
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn test_query_embedding_uses_table() {
    let (embedder, provider) = embedder_with(90);

    let vector = embedder.embed_query("tell me about doc1").await.unwrap();
    assert_eq!(vector, axis(4, 1));
    assert_eq!(provider.call_count(), 1);
}

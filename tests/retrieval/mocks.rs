// Deterministic provider doubles shared by the retrieval test modules

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use finax_retrieval::chunks::DocChunk;
use finax_retrieval::embeddings::{EmbeddingProvider, InputType};
use finax_retrieval::providers::ProviderError;
use finax_retrieval::rerank::{RankedHit, RerankProvider};

/// Embeds texts by substring lookup into a fixed vector table
///
/// The first table entry whose key occurs in the text wins; texts with
/// no match get a one-hot vector on the fallback axis. Deterministic,
/// so identical inputs always embed identically.
pub struct KeywordEmbedder {
    pub dim: usize,
    pub table: Vec<(String, Vec<f32>)>,
    pub fallback_axis: usize,
    pub calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(dim: usize, table: Vec<(&str, Vec<f32>)>) -> Self {
        Self {
            dim,
            table: table
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            fallback_axis: dim - 1,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        for (key, vector) in &self.table {
            if text.contains(key.as_str()) {
                return vector.clone();
            }
        }
        let mut v = vec![0.0; self.dim];
        v[self.fallback_axis] = 1.0;
        v
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed(
        &self,
        texts: &[String],
        _input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn name(&self) -> &'static str {
        "keyword-embedder"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Scores candidates by substring lookup into a fixed score table
///
/// Unmatched candidates score 0. Results are sorted by descending
/// score (stable, so ties keep candidate order) and capped at top_n.
pub struct ScriptedReranker {
    pub scores: Vec<(String, f32)>,
    pub calls: AtomicUsize,
}

impl ScriptedReranker {
    pub fn new(scores: Vec<(&str, f32)>) -> Self {
        Self {
            scores: scores
                .into_iter()
                .map(|(k, s)| (k.to_string(), s))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn score_for(&self, text: &str) -> f32 {
        for (key, score) in &self.scores {
            if text.contains(key.as_str()) {
                return *score;
            }
        }
        0.0
    }
}

#[async_trait]
impl RerankProvider for ScriptedReranker {
    async fn rerank(
        &self,
        _query: &str,
        documents: &[DocChunk],
        top_n: usize,
        _rank_fields: &[&str],
    ) -> Result<Vec<RankedHit>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut hits: Vec<RankedHit> = documents
            .iter()
            .enumerate()
            .map(|(index, doc)| RankedHit {
                index,
                relevance_score: self.score_for(&doc.text),
            })
            .collect();
        hits.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_n);
        Ok(hits)
    }

    fn name(&self) -> &'static str {
        "scripted-reranker"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// One-hot unit vector
pub fn axis(dim: usize, hot: usize) -> Vec<f32> {
    let mut v = vec![0.0; dim];
    v[hot] = 1.0;
    v
}

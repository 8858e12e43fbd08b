//! Per-document embedding index: exact nearest-neighbor search with
//! token-budgeted context assembly
//!
//! Vectors and chunk texts are serialized row-wise in a single record per
//! document key, so the two can never be persisted independently and drift
//! out of sync.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, IndexStorage};
use crate::types::Chunk;

/// A retrieved chunk with its distance to the query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// Chunk text
    pub content: String,
    /// Squared Euclidean (L2) distance; lower is closer
    pub distance: f32,
}

/// Persisted index record: one per document key
#[derive(Serialize, Deserialize)]
struct IndexRecord {
    /// Embedding dimensions for every row
    dimensions: usize,
    /// Ordered chunks, each carrying its own vector
    chunks: Vec<Chunk>,
}

/// Estimate token count (approximate: 1 token ~ 4 chars of English text)
pub fn estimate_tokens(text: &str) -> usize {
    text.len() / 4
}

/// Embedding index over an injected embedder and storage backend
pub struct EmbeddingIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    storage: Arc<dyn IndexStorage>,
}

impl EmbeddingIndex {
    /// Create an index facade over the given providers
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, storage: Arc<dyn IndexStorage>) -> Self {
        Self { embedder, storage }
    }

    /// Embed every chunk and persist the record under `key`
    ///
    /// Replaces any record already stored for the key. Returns the number
    /// of chunks indexed.
    pub async fn build(&self, chunks: &[String], key: &str) -> Result<usize> {
        let embeddings = self.embedder.embed_batch(chunks).await?;

        let rows: Vec<Chunk> = chunks
            .iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (content, embedding))| Chunk::new(i as u32, content.clone(), embedding))
            .collect();

        let record = IndexRecord {
            dimensions: self.embedder.dimensions(),
            chunks: rows,
        };

        let bytes = serde_json::to_vec(&record)?;
        self.storage.put(key, &bytes).await?;

        tracing::debug!(key, chunks = record.chunks.len(), "built embedding index");
        Ok(record.chunks.len())
    }

    /// Number of chunks stored for `key`
    pub async fn chunk_count(&self, key: &str) -> Result<usize> {
        Ok(self.load(key).await?.chunks.len())
    }

    /// Search the index for the `top_k` chunks nearest to `query`
    ///
    /// Results are ordered by ascending distance. Fails with
    /// `Error::IndexNotFound` when no record exists for the key; an existing
    /// record with zero rows yields an empty result.
    pub async fn search(&self, query: &str, key: &str, top_k: usize) -> Result<Vec<ScoredChunk>> {
        let record = self.load(key).await?;
        if record.chunks.is_empty() {
            tracing::warn!(key, "embedding index has zero vectors");
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        if query_embedding.len() != record.dimensions {
            return Err(Error::embedding(format!(
                "query embedding has {} dimensions, index has {}",
                query_embedding.len(),
                record.dimensions
            )));
        }

        let mut scored: Vec<ScoredChunk> = record
            .chunks
            .into_iter()
            .map(|chunk| ScoredChunk {
                distance: squared_l2(&query_embedding, &chunk.embedding),
                content: chunk.content,
            })
            .collect();

        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        scored.truncate(top_k);

        tracing::debug!(
            key,
            results = scored.len(),
            nearest = scored.first().map(|s| s.distance),
            "index search complete"
        );

        Ok(scored)
    }

    /// Retrieve up to `top_k` chunks, keeping the assembled context within
    /// a token budget
    ///
    /// Chunks accumulate in ranked order while the running estimate
    /// (`chars / 4`, counting the newline separators the caller will join
    /// with) stays within `max_tokens`. The first chunk that would exceed
    /// the budget is truncated to the remaining character allowance
    /// (`remaining_tokens * 4`, snapped back to a char boundary) and kept if
    /// non-empty; everything after it is discarded.
    pub async fn retrieve_within_budget(
        &self,
        query: &str,
        key: &str,
        top_k: usize,
        max_tokens: usize,
    ) -> Result<Vec<String>> {
        let ranked = self.search(query, key, top_k).await?;

        let allowance_chars = max_tokens.saturating_mul(4);
        let mut used_chars = 0usize;
        let mut selected = Vec::new();

        for scored in ranked {
            let separator = usize::from(!selected.is_empty());
            let cost = separator + scored.content.len();

            if used_chars + cost <= allowance_chars {
                used_chars += cost;
                selected.push(scored.content);
            } else {
                let remaining = allowance_chars.saturating_sub(used_chars + separator);
                let truncated = truncate_at_char_boundary(&scored.content, remaining);
                if !truncated.is_empty() {
                    selected.push(truncated.to_string());
                }
                break;
            }
        }

        tracing::debug!(
            key,
            chunks = selected.len(),
            tokens = used_chars / 4,
            budget = max_tokens,
            "assembled retrieval context"
        );

        Ok(selected)
    }

    async fn load(&self, key: &str) -> Result<IndexRecord> {
        let bytes = self
            .storage
            .get(key)
            .await?
            .ok_or_else(|| Error::IndexNotFound(key.to_string()))?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Truncate to at most `max_bytes`, never splitting a UTF-8 code point
fn truncate_at_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MemoryIndexStorage;
    use crate::testutil::HashEmbedder;

    fn index() -> EmbeddingIndex {
        EmbeddingIndex::new(
            Arc::new(HashEmbedder::new(16)),
            Arc::new(MemoryIndexStorage::new()),
        )
    }

    fn sample_chunks() -> Vec<String> {
        vec![
            "the policy covers hospitalization and surgery".to_string(),
            "exclusions include cosmetic procedures".to_string(),
            "claims must be filed within thirty days".to_string(),
        ]
    }

    #[tokio::test]
    async fn own_text_query_returns_chunk_with_near_zero_distance() {
        let index = index();
        let chunks = sample_chunks();
        index.build(&chunks, "doc").await.unwrap();

        let results = index.search(&chunks[1], "doc", 3).await.unwrap();
        assert_eq!(results[0].content, chunks[1]);
        assert!(results[0].distance < 1e-6);
    }

    #[tokio::test]
    async fn results_are_ascending_by_distance() {
        let index = index();
        index.build(&sample_chunks(), "doc").await.unwrap();

        let results = index.search("surgery coverage", "doc", 3).await.unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[tokio::test]
    async fn missing_key_is_index_not_found() {
        let index = index();
        let err = index.search("anything", "nope", 3).await.unwrap_err();
        assert!(matches!(err, Error::IndexNotFound(key) if key == "nope"));
    }

    #[tokio::test]
    async fn zero_vector_index_yields_empty_result() {
        let index = index();
        index.build(&[], "empty").await.unwrap();

        let results = index.search("anything", "empty", 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn rebuild_replaces_previous_record() {
        let index = index();
        index.build(&sample_chunks(), "doc").await.unwrap();
        index.build(&["only one chunk left".to_string()], "doc").await.unwrap();
        assert_eq!(index.chunk_count("doc").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn budget_is_never_exceeded() {
        let index = index();
        index.build(&sample_chunks(), "doc").await.unwrap();

        for budget in [0, 1, 5, 10, 50, 1500] {
            let chunks = index
                .retrieve_within_budget("policy", "doc", 3, budget)
                .await
                .unwrap();
            let joined = chunks.join("\n");
            assert!(
                estimate_tokens(&joined) <= budget,
                "budget {budget} exceeded: {} tokens",
                estimate_tokens(&joined)
            );
        }
    }

    #[tokio::test]
    async fn overflowing_chunk_is_truncated_not_dropped() {
        let index = index();
        let chunks = vec!["a".repeat(400), "b".repeat(400)];
        index.build(&chunks, "doc").await.unwrap();

        // 120 tokens = 480 chars: first chunk fits whole, second truncated.
        let selected = index
            .retrieve_within_budget(&chunks[0], "doc", 2, 120)
            .await
            .unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].len(), 400);
        assert!(!selected[1].is_empty());
        assert!(selected[1].len() < 400);
    }

    #[tokio::test]
    async fn truncation_respects_char_boundaries() {
        let index = index();
        // Multi-byte text: each 'é' is 2 bytes.
        let chunks = vec!["é".repeat(300)];
        index.build(&chunks, "doc").await.unwrap();

        let selected = index
            .retrieve_within_budget("é", "doc", 1, 25)
            .await
            .unwrap();
        assert_eq!(selected.len(), 1);
        assert!(selected[0].len() <= 100);
        assert!(selected[0].chars().all(|c| c == 'é'));
    }
}

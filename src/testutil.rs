//! Deterministic provider fakes shared across the test suite

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, GenerationProvider};
use crate::types::{Completion, TokenUsage};

/// Deterministic bag-of-words embedder
///
/// Hashes each word into a bucket and L2-normalizes, so identical text
/// always embeds identically and lexically similar text lands nearby.
pub struct HashEmbedder {
    dims: usize,
}

impl HashEmbedder {
    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(1) }
    }

    fn hash_word(word: &str) -> u64 {
        // FNV-1a
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in word.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        hash
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dims];
        for word in text.to_lowercase().split_whitespace() {
            let bucket = (Self::hash_word(word) % self.dims as u64) as usize;
            vector[bucket] += 1.0;
        }

        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "hash"
    }
}

/// Scripted generation provider
///
/// Fails with rate-limit errors a configured number of times, then answers
/// with a fixed completion; records call counts and the last prompt pair.
pub struct ScriptedGenerator {
    answer: String,
    usage: TokenUsage,
    failures_before_success: u32,
    calls: AtomicU32,
    last_prompts: Mutex<Option<(String, String)>>,
}

impl ScriptedGenerator {
    pub fn answering(answer: impl Into<String>, usage: TokenUsage) -> Self {
        Self::rate_limited_then_answering(0, answer, usage)
    }

    pub fn rate_limited_then_answering(
        failures: u32,
        answer: impl Into<String>,
        usage: TokenUsage,
    ) -> Self {
        Self {
            answer: answer.into(),
            usage,
            failures_before_success: failures,
            calls: AtomicU32::new(0),
            last_prompts: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompts(&self) -> Option<(String, String)> {
        self.last_prompts.lock().clone()
    }
}

#[async_trait]
impl GenerationProvider for ScriptedGenerator {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<Completion> {
        *self.last_prompts.lock() =
            Some((system_prompt.to_string(), user_prompt.to_string()));

        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures_before_success {
            return Err(Error::RateLimited(
                "rate_limit_exceeded: Please try again in 0.1s".to_string(),
            ));
        }

        Ok(Completion {
            text: self.answer.clone(),
            usage: self.usage,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}

//! Answer and token-usage types

use serde::{Deserialize, Serialize};

/// Token usage reported by the generation service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt-side tokens
    pub input_tokens: u32,
    /// Completion-side tokens
    pub output_tokens: u32,
    /// Total tokens billed for the call
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Zero usage, reported by deterministic structured answers
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Raw completion returned by a generation provider
#[derive(Debug, Clone)]
pub struct Completion {
    /// Generated text
    pub text: String,
    /// Usage metadata parsed from the provider reply
    pub usage: TokenUsage,
}

/// Final answer returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Answer text
    pub answer: String,
    /// Token usage; zero for structured short-circuits
    pub token_usage: TokenUsage,
}

impl Answer {
    /// Deterministic structured answer with no generation cost
    pub fn structured(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            token_usage: TokenUsage::zero(),
        }
    }

    /// Generated answer carrying provider-reported usage
    pub fn generated(answer: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            answer: answer.into(),
            token_usage: usage,
        }
    }
}

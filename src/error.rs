//! Error types for the answering pipeline

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Answering pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No index has been built for the requested document key
    #[error("No embedding index found for document '{0}'")]
    IndexNotFound(String),

    /// An index exists for the key but contains zero vectors
    #[error("Embedding index for document '{0}' is empty")]
    EmptyIndex(String),

    /// Empty text handed to the structured extractor
    #[error("No text content found in document")]
    EmptyDocument,

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Index storage error
    #[error("Index storage error: {0}")]
    Storage(String),

    /// Rate-limited by the generation service; the message may embed a retry hint
    #[error("Generation service rate limited: {0}")]
    RateLimited(String),

    /// Generation service failure (non-rate-limit)
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Retry policy exhausted all attempts
    #[error("Max retries reached")]
    MaxRetriesExceeded,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

fn retry_hint_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"try again in\s*([0-9]+(?:\.[0-9]+)?)s").unwrap())
}

impl Error {
    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Whether this error signals a rate limit and is worth retrying
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }

    /// Server-suggested retry delay in seconds, parsed from the error message
    ///
    /// Matches a decimal value after "try again in" (e.g. "Please try again
    /// in 2.5s"). Returns `None` when the message carries no hint.
    pub fn retry_hint_secs(&self) -> Option<f64> {
        let Self::RateLimited(message) = self else {
            return None;
        };
        retry_hint_regex()
            .captures(message)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_retry_hint_from_message() {
        let err = Error::RateLimited(
            "rate_limit_exceeded: Please try again in 2.5s before retrying".to_string(),
        );
        assert!(err.is_rate_limited());
        assert_eq!(err.retry_hint_secs(), Some(2.5));
    }

    #[test]
    fn missing_hint_yields_none() {
        let err = Error::RateLimited("rate_limit_exceeded".to_string());
        assert_eq!(err.retry_hint_secs(), None);
    }

    #[test]
    fn non_rate_limit_errors_have_no_hint() {
        let err = Error::Generation("try again in 3s".to_string());
        assert!(!err.is_rate_limited());
        assert_eq!(err.retry_hint_secs(), None);
    }
}

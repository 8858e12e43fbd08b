//! docquery: hybrid document question answering
//!
//! Answers natural-language questions against uploaded document text by
//! combining two strategies: a deterministic rule-based field extractor
//! (fast, explainable, free) and a retrieval-augmented fallback that
//! searches semantically similar chunks and forwards them to an external
//! generative model under a retry/backoff policy.
//!
//! The crate is a library invoked by a request-handling layer; file-format
//! parsing, upload storage, and HTTP concerns live outside it.

pub mod analysis;
pub mod config;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retry;
pub mod routing;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use analysis::{DocumentAnalysis, DocumentAnalyzer, DocumentType};
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use index::EmbeddingIndex;
pub use pipeline::DocumentPipeline;
pub use retry::RetryPolicy;
pub use types::{Answer, Chunk, Document, QueryType, TokenUsage};

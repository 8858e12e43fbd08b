//! Core data types for documents, queries, and answers

pub mod answer;
pub mod document;
pub mod query;

pub use answer::{Answer, Completion, TokenUsage};
pub use document::{Chunk, Document};
pub use query::QueryType;

//! Document and chunk types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::DocumentAnalysis;

/// A bounded word-window of document text, the unit of embedding and retrieval
///
/// Vector and text travel together in one record so the persisted index can
/// never hold a vector whose parallel chunk text is missing or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in the document's ordered chunk sequence
    pub index: u32,
    /// Chunk text span
    pub content: String,
    /// Embedding vector, fixed dimension across the document
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(index: u32, content: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            index,
            content: content.into(),
            embedding,
        }
    }
}

/// An ingested document, immutable once indexed
///
/// Re-uploading the same content creates a new `Document` under a new key;
/// the pipeline never mutates an existing record in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Internal identifier
    pub id: Uuid,
    /// Caller-supplied stable key (e.g. a filename token)
    pub key: String,
    /// Raw extracted text, treated as opaque
    pub text: String,
    /// Number of chunks persisted in the embedding index
    pub chunk_count: usize,
    /// Structured field map produced at ingestion time, read-only afterward
    pub analysis: DocumentAnalysis,
    /// Ingestion timestamp
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Create a new document record
    pub fn new(
        key: impl Into<String>,
        text: impl Into<String>,
        chunk_count: usize,
        analysis: DocumentAnalysis,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: key.into(),
            text: text.into(),
            chunk_count,
            analysis,
            created_at: Utc::now(),
        }
    }
}

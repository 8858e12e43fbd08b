//! Pipeline facade: wires the chunker, index, analyzer, and router over
//! injected providers

use std::sync::Arc;

use crate::analysis::DocumentAnalyzer;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::generation::GenerationClient;
use crate::index::EmbeddingIndex;
use crate::ingestion::WordChunker;
use crate::providers::{EmbeddingProvider, GenerationProvider, IndexStorage};
use crate::retry::RetryPolicy;
use crate::routing::QueryRouter;
use crate::types::{Answer, Document, QueryType};

/// The hybrid answering pipeline
///
/// Constructed once from explicit provider dependencies and shared across
/// requests. Operations are request-scoped and stateless apart from the
/// write-once per-document index records; concurrent ingestion of the same
/// key must be serialized by the caller.
pub struct DocumentPipeline {
    chunker: WordChunker,
    analyzer: DocumentAnalyzer,
    index: Arc<EmbeddingIndex>,
    router: QueryRouter,
}

impl DocumentPipeline {
    /// Assemble a pipeline from configuration and providers
    pub fn new(
        config: &PipelineConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationProvider>,
        storage: Arc<dyn IndexStorage>,
    ) -> Self {
        let index = Arc::new(EmbeddingIndex::new(embedder, storage));
        let client = GenerationClient::new(generator, RetryPolicy::from_config(&config.retry));
        let router = QueryRouter::new(Arc::clone(&index), client, config.retrieval.clone());

        Self {
            chunker: WordChunker::new(config.chunking.chunk_size),
            analyzer: DocumentAnalyzer::new(),
            index,
            router,
        }
    }

    /// Ingest raw document text under a stable key
    ///
    /// Runs analysis, chunks the text, and persists the embedding index.
    /// Empty text fails with `Error::EmptyDocument` before anything is
    /// written: no content means no chunks either.
    pub async fn ingest(&self, key: &str, text: &str) -> Result<Document> {
        let analysis = self.analyzer.analyze(text)?;

        let chunks = self.chunker.split(text);
        let chunk_count = self.index.build(&chunks, key).await?;

        tracing::info!(
            key,
            chunk_count,
            document_type = analysis.document_type.label(),
            "document ingested"
        );

        Ok(Document::new(key, text, chunk_count, analysis))
    }

    /// Answer a question against an ingested document
    pub async fn answer(
        &self,
        question: &str,
        document: &Document,
        hint: QueryType,
    ) -> Result<Answer> {
        self.router
            .answer(question, &document.key, &document.analysis, hint)
            .await
    }

    /// The underlying embedding index, for direct retrieval access
    pub fn index(&self) -> &Arc<EmbeddingIndex> {
        &self.index
    }
}

//! Provider abstractions for embeddings, generation, and index storage
//!
//! Trait-based seams so the pipeline is constructed from explicit
//! dependencies instead of process-wide singletons, and tests can inject
//! deterministic fakes.

pub mod embedding;
pub mod llm;
pub mod ollama;
pub mod openai;
pub mod storage;

pub use embedding::EmbeddingProvider;
pub use llm::GenerationProvider;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiChatClient;
pub use storage::{FsIndexStorage, IndexStorage, MemoryIndexStorage};

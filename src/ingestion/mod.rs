//! Document ingestion: chunking raw text for indexing

pub mod chunker;

pub use chunker::WordChunker;

//! Answer generation: prompt templates, the generation client, and the
//! advisory query-type suggestion matcher

pub mod client;
pub mod prompt;
pub mod suggest;

pub use client::GenerationClient;
pub use prompt::PromptBuilder;
pub use suggest::suggest_query_type;

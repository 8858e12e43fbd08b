//! Generation client: prompt assembly, retry-wrapped completion, and the
//! advisory suggestion note

use std::sync::Arc;

use crate::error::Result;
use crate::providers::GenerationProvider;
use crate::retry::RetryPolicy;
use crate::types::{Answer, QueryType};

use super::prompt::PromptBuilder;
use super::suggest::suggest_query_type;

/// Client for the external generative model
///
/// Selects the system instruction for the query-type hint, builds the
/// context/question prompt, and runs the completion under the retry
/// policy. Token usage comes back verbatim from the provider.
pub struct GenerationClient {
    provider: Arc<dyn GenerationProvider>,
    retry: RetryPolicy,
}

impl GenerationClient {
    /// Create a client over a provider and retry policy
    pub fn new(provider: Arc<dyn GenerationProvider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    /// Generate an answer for a question over retrieved context
    ///
    /// For `General` hints a suggestion note may be appended to the answer
    /// text when the question matches a more specific category; the note is
    /// advisory only and never changes routing.
    pub async fn generate(
        &self,
        question: &str,
        context: &str,
        query_type: QueryType,
    ) -> Result<Answer> {
        let system = PromptBuilder::system_instruction(query_type).to_string();
        let user = PromptBuilder::user_prompt(question, context);

        tracing::info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            query_type = %query_type,
            "generating answer"
        );

        let provider = Arc::clone(&self.provider);
        let completion = self
            .retry
            .run(move || {
                let provider = Arc::clone(&provider);
                let system = system.clone();
                let user = user.clone();
                async move { provider.complete(&system, &user).await }
            })
            .await?;

        let mut answer_text = completion.text;
        if query_type == QueryType::General {
            if let Some(suggested) = suggest_query_type(question) {
                answer_text.push_str(&format!(
                    "\n\nNote: this looks like a '{suggested}' question; selecting that \
                     query type may give a more focused answer."
                ));
            }
        }

        Ok(Answer::generated(answer_text, completion.usage))
    }
}

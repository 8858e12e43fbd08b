//! Prompt templates for generation

use crate::types::QueryType;

/// Prompt builder: fixed system instruction per query type plus the
/// context/question user prompt
pub struct PromptBuilder;

impl PromptBuilder {
    /// System instruction template for a query-type hint
    ///
    /// Each template biases the model toward a specialized analytical
    /// persona; `General` is the fallback for unknown hints.
    pub fn system_instruction(query_type: QueryType) -> &'static str {
        match query_type {
            QueryType::General => {
                "You are a document analysis assistant. Answer the question using only \
                 the provided context. Be accurate and concise; if the context does not \
                 contain the answer, say so."
            }
            QueryType::Coverage => {
                "You are a document analysis assistant specializing in coverage analysis. \
                 Answer using only the provided context, focusing on coverage details, \
                 limits, and what is included. If the context does not contain the \
                 answer, say so."
            }
            QueryType::Exclusions => {
                "You are a document analysis assistant specializing in exclusions. Answer \
                 using only the provided context, paying special attention to exclusions, \
                 limitations, and what is NOT covered. If the context does not contain \
                 the answer, say so."
            }
            QueryType::Claims => {
                "You are a document analysis assistant specializing in claims handling. \
                 Answer using only the provided context, focusing on claims procedures, \
                 requirements, and deadlines. If the context does not contain the \
                 answer, say so."
            }
            QueryType::Premium => {
                "You are a document analysis assistant specializing in pricing. Answer \
                 using only the provided context, focusing on premiums, costs, payment \
                 schedules, and fees. If the context does not contain the answer, say so."
            }
            QueryType::Duration => {
                "You are a document analysis assistant specializing in policy periods. \
                 Answer using only the provided context, focusing on durations, terms, \
                 and effective or expiry dates; quote numeric periods exactly as written. \
                 If the context does not contain the answer, say so."
            }
            QueryType::Terms => {
                "You are a document analysis assistant specializing in terms and \
                 conditions. Answer using only the provided context, focusing on \
                 obligations, provisions, and conditions that apply. If the context does \
                 not contain the answer, say so."
            }
            QueryType::Definitions => {
                "You are a document analysis assistant specializing in defined terms. \
                 Answer using only the provided context, quoting definitions exactly and \
                 naming the term being defined. If the context does not contain the \
                 answer, say so."
            }
        }
    }

    /// Two-part user prompt: retrieved context followed by the question
    pub fn user_prompt(question: &str, context: &str) -> String {
        format!("Context:\n{context}\n\nQuestion:\n{question}")
    }
}

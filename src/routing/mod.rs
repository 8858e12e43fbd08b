//! Query routing: structured extraction first, retrieval-augmented
//! generation as the fallback
//!
//! Structured lookups are free, deterministic, and auditable when they
//! succeed; generation is the expensive, probabilistic path reserved for
//! questions the rule set cannot resolve.

use std::sync::Arc;

use crate::analysis::rules::{has_duration_keyword, has_duration_pattern};
use crate::analysis::{DocumentAnalysis, DocumentType, PolicyFields};
use crate::config::RetrievalConfig;
use crate::error::{Error, Result};
use crate::generation::GenerationClient;
use crate::index::EmbeddingIndex;
use crate::types::{Answer, QueryType};

type FieldLookup = fn(&PolicyFields) -> Option<String>;

/// One row of the structured-lookup dispatch table
///
/// A rule applies when the caller's hint names it or the question mentions
/// one of its keywords; only the first applicable rule is consulted, so
/// table order is part of the contract.
struct FieldRule {
    query_type: QueryType,
    question_keywords: &'static [&'static str],
    lookup: FieldLookup,
}

const RULES: &[FieldRule] = &[
    FieldRule {
        query_type: QueryType::Duration,
        question_keywords: &[
            "duration",
            "period",
            "term",
            "policy term",
            "policy period",
            "length",
            "how long",
        ],
        lookup: lookup_duration,
    },
    FieldRule {
        query_type: QueryType::Coverage,
        question_keywords: &["coverage", "covered", "protection", "benefits"],
        lookup: lookup_coverage,
    },
    FieldRule {
        query_type: QueryType::Exclusions,
        question_keywords: &["exclusion", "excluded", "not covered"],
        lookup: lookup_exclusions,
    },
    FieldRule {
        query_type: QueryType::Claims,
        question_keywords: &["claim", "file a claim", "claims process", "how to claim"],
        lookup: lookup_claims,
    },
    FieldRule {
        query_type: QueryType::Premium,
        question_keywords: &["premium", "cost", "price", "payment", "fee"],
        lookup: lookup_premium,
    },
    FieldRule {
        query_type: QueryType::Terms,
        question_keywords: &["terms", "conditions", "terms and conditions"],
        lookup: lookup_terms,
    },
    FieldRule {
        query_type: QueryType::Definitions,
        question_keywords: &["definition", "define", "meaning"],
        lookup: lookup_definitions,
    },
];

fn first_with_keyword(snippets: &[String], keywords: &[&str]) -> Option<String> {
    snippets
        .iter()
        .find(|snippet| {
            let lower = snippet.to_lowercase();
            keywords.iter().any(|k| lower.contains(k))
        })
        .cloned()
}

/// Duration answers run the two-tier preference across every
/// duration-bearing section: numeric pattern first, keyword-only second
fn lookup_duration(fields: &PolicyFields) -> Option<String> {
    let sections = [
        &fields.key_terms,
        &fields.terms_conditions,
        &fields.definitions,
    ];

    for section in sections {
        for snippet in section.iter() {
            if has_duration_keyword(snippet) && has_duration_pattern(snippet) {
                return Some(snippet.clone());
            }
        }
    }

    for section in sections {
        for snippet in section.iter() {
            if has_duration_keyword(snippet) {
                return Some(snippet.clone());
            }
        }
    }

    None
}

fn lookup_coverage(fields: &PolicyFields) -> Option<String> {
    first_with_keyword(
        &fields.coverage_details,
        &["coverage", "covered", "benefits", "included"],
    )
}

fn lookup_exclusions(fields: &PolicyFields) -> Option<String> {
    first_with_keyword(
        &fields.exclusions,
        &["exclusion", "excluded", "not covered", "limitation"],
    )
}

fn lookup_claims(fields: &PolicyFields) -> Option<String> {
    first_with_keyword(
        &fields.claims_process,
        &["claim", "claims", "file", "process", "procedure"],
    )
}

fn lookup_premium(fields: &PolicyFields) -> Option<String> {
    let keywords = ["premium", "cost", "price", "payment", "fee"];
    fields
        .premium_info
        .as_ref()
        .filter(|info| {
            let lower = info.to_lowercase();
            keywords.iter().any(|k| lower.contains(k))
        })
        .cloned()
}

fn lookup_terms(fields: &PolicyFields) -> Option<String> {
    first_with_keyword(
        &fields.terms_conditions,
        &["terms", "conditions", "provision", "clause"],
    )
}

fn lookup_definitions(fields: &PolicyFields) -> Option<String> {
    first_with_keyword(
        &fields.definitions,
        &["definition", "defined as", "means", "refers to"],
    )
}

/// Attempt a deterministic answer from the structured field map
///
/// Returns `None` when the document category has no structured rules, no
/// rule applies, or the first applicable rule finds nothing relevant.
pub fn structured_lookup(
    question: &str,
    analysis: &DocumentAnalysis,
    hint: QueryType,
) -> Option<String> {
    if analysis.document_type != DocumentType::InsurancePolicy {
        return None;
    }
    let fields = analysis.policy_fields()?;

    let question_lower = question.to_lowercase();
    let rule = RULES.iter().find(|rule| {
        hint == rule.query_type
            || rule
                .question_keywords
                .iter()
                .any(|k| question_lower.contains(k))
    })?;

    (rule.lookup)(fields)
}

/// Arbitrates between structured extraction and retrieval + generation
pub struct QueryRouter {
    index: Arc<EmbeddingIndex>,
    generator: GenerationClient,
    retrieval: RetrievalConfig,
}

impl QueryRouter {
    /// Create a router over an index, a generation client, and retrieval
    /// settings
    pub fn new(
        index: Arc<EmbeddingIndex>,
        generator: GenerationClient,
        retrieval: RetrievalConfig,
    ) -> Self {
        Self {
            index,
            generator,
            retrieval,
        }
    }

    /// Answer a question against an ingested document
    ///
    /// Structured hits short-circuit with zero token usage. Otherwise the
    /// index is queried within the token budget and the joined context goes
    /// to the generation client; an unavailable or empty index degrades to
    /// an empty context rather than failing the request.
    pub async fn answer(
        &self,
        question: &str,
        document_key: &str,
        analysis: &DocumentAnalysis,
        hint: QueryType,
    ) -> Result<Answer> {
        if let Some(snippet) = structured_lookup(question, analysis, hint) {
            tracing::debug!(document_key, "structured extraction answered the question");
            return Ok(Answer::structured(snippet));
        }

        tracing::debug!(document_key, "no structured answer, falling back to retrieval");

        let chunks = match self
            .index
            .retrieve_within_budget(
                question,
                document_key,
                self.retrieval.top_k,
                self.retrieval.max_context_tokens,
            )
            .await
        {
            Ok(chunks) => chunks,
            Err(e @ (Error::IndexNotFound(_) | Error::EmptyIndex(_))) => {
                tracing::warn!(document_key, error = %e, "retrieval unavailable, using empty context");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let context = chunks.join("\n");
        self.generator.generate(question, &context, hint).await
    }
}

//! Structured extraction: document classification and rule-based field maps

pub mod classify;
pub mod rules;

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use classify::{detect_document_type, DocumentType};
use rules::{extract_field, extract_field_uncapped, find_section, prefer_duration, SectionRule};

/// Structured field map produced once per document at analysis time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Classified document category
    pub document_type: DocumentType,
    /// Category-specific extracted fields
    pub fields: AnalysisFields,
}

impl DocumentAnalysis {
    /// Policy fields, when the document classified as an insurance policy
    pub fn policy_fields(&self) -> Option<&PolicyFields> {
        match &self.fields {
            AnalysisFields::Policy(fields) => Some(fields),
            AnalysisFields::General(_) => None,
        }
    }
}

/// Extracted fields, shaped by the document category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AnalysisFields {
    /// Insurance-policy rule set output
    Policy(PolicyFields),
    /// Generic document analysis
    General(GeneralFields),
}

/// Fields extracted from an insurance policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyFields {
    /// Specific policy line (e.g. "Health Insurance")
    pub policy_type: String,
    /// Coverage snippets
    pub coverage_details: Vec<String>,
    /// Exclusion snippets
    pub exclusions: Vec<String>,
    /// Claims-process snippets
    pub claims_process: Vec<String>,
    /// Premium section, capped at 200 characters; `None` when absent
    pub premium_info: Option<String>,
    /// Key terms, duration-preferenced
    pub key_terms: Vec<String>,
    /// Terms and conditions, duration-preferenced
    pub terms_conditions: Vec<String>,
    /// Defined terms, duration-preferenced
    pub definitions: Vec<String>,
    /// Section titles detected anywhere in the document
    pub key_sections: Vec<String>,
}

/// Generic analysis for documents without structured rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralFields {
    /// Most frequent meaningful words
    pub key_topics: Vec<String>,
    /// Dates found by pattern families
    pub important_dates: Vec<String>,
    /// Capitalized multi-word phrases
    pub key_entities: Vec<String>,
    /// Leading-sentence summary, capped at 300 characters
    pub summary: String,
    /// Whitespace word count
    pub word_count: usize,
    /// Rough page estimate (chars / 500)
    pub estimated_pages: usize,
}

const COVERAGE_RULE: SectionRule = SectionRule {
    headers: &["coverage", "benefits", "what is covered"],
    cap: 5,
};

const EXCLUSIONS_RULE: SectionRule = SectionRule {
    headers: &["exclusions", "what is not covered", "limitations"],
    cap: 5,
};

const CLAIMS_RULE: SectionRule = SectionRule {
    headers: &["claims", "claim process", "filing claims"],
    cap: 5,
};

const PREMIUM_HEADERS: &[&str] = &["premium", "payment", "cost"];
const KEY_TERMS_HEADERS: &[&str] = &["terms", "conditions", "provisions", "key terms"];
const TERMS_CONDITIONS_HEADERS: &[&str] =
    &["terms and conditions", "terms & conditions", "policy terms"];
const DEFINITIONS_HEADERS: &[&str] = &["definitions", "defined terms"];

const POLICY_LINES: &[&str] = &["health", "life", "auto", "home", "property", "liability"];

const SECTION_TITLE_KEYWORDS: &[&str] = &[
    "coverage",
    "exclusions",
    "claims",
    "premium",
    "terms",
    "conditions",
    "definitions",
];

const PREMIUM_CAP: usize = 200;
const SUMMARY_CAP: usize = 300;
const FIELD_CAP: usize = 5;
const TOPIC_CAP: usize = 10;
const DATE_CAP: usize = 5;
const ENTITY_CAP: usize = 10;

/// Rule-based document analyzer
///
/// Classifies the document, then runs the category's extraction rule set.
/// Stateless; safe to share across requests.
#[derive(Debug, Default)]
pub struct DocumentAnalyzer;

impl DocumentAnalyzer {
    /// Create an analyzer
    pub fn new() -> Self {
        Self
    }

    /// Analyze document text into a structured field map
    ///
    /// Empty (or whitespace-only) input is an error: no content means
    /// nothing downstream can answer from either.
    pub fn analyze(&self, text: &str) -> Result<DocumentAnalysis> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let text_lower = text.to_lowercase();
        let document_type = detect_document_type(&text_lower);

        tracing::debug!(document_type = document_type.label(), "classified document");

        let fields = match document_type {
            DocumentType::InsurancePolicy => {
                AnalysisFields::Policy(self.extract_policy_fields(text, &text_lower))
            }
            _ => AnalysisFields::General(self.extract_general_fields(text, &text_lower)),
        };

        Ok(DocumentAnalysis {
            document_type,
            fields,
        })
    }

    fn extract_policy_fields(&self, text: &str, text_lower: &str) -> PolicyFields {
        PolicyFields {
            policy_type: extract_policy_type(text_lower),
            coverage_details: extract_field(text, &COVERAGE_RULE),
            exclusions: extract_field(text, &EXCLUSIONS_RULE),
            claims_process: extract_field(text, &CLAIMS_RULE),
            premium_info: extract_premium_info(text),
            key_terms: extract_duration_field(text, KEY_TERMS_HEADERS),
            terms_conditions: extract_duration_field(text, TERMS_CONDITIONS_HEADERS),
            definitions: extract_duration_field(text, DEFINITIONS_HEADERS),
            key_sections: identify_sections(text_lower),
        }
    }

    fn extract_general_fields(&self, text: &str, text_lower: &str) -> GeneralFields {
        GeneralFields {
            key_topics: extract_key_topics(text_lower),
            important_dates: extract_dates(text),
            key_entities: extract_entities(text),
            summary: generate_summary(text),
            word_count: text.split_whitespace().count(),
            estimated_pages: text.len() / 500,
        }
    }
}

/// Duration-like fields run the two-tier preference before capping
fn extract_duration_field(text: &str, headers: &[&str]) -> Vec<String> {
    let snippets = extract_field_uncapped(text, headers);
    let mut preferred = prefer_duration(&snippets);
    preferred.truncate(FIELD_CAP);
    preferred
}

fn extract_policy_type(text_lower: &str) -> String {
    for line in POLICY_LINES {
        if text_lower.contains(line) {
            let mut label = String::new();
            let mut chars = line.chars();
            if let Some(first) = chars.next() {
                label.extend(first.to_uppercase());
                label.push_str(chars.as_str());
            }
            label.push_str(" Insurance");
            return label;
        }
    }
    "Insurance Policy".to_string()
}

fn extract_premium_info(text: &str) -> Option<String> {
    let section = find_section(text, PREMIUM_HEADERS).join("\n");
    if section.is_empty() {
        return None;
    }
    Some(cap_with_ellipsis(&section, PREMIUM_CAP))
}

fn identify_sections(text_lower: &str) -> Vec<String> {
    SECTION_TITLE_KEYWORDS
        .iter()
        .filter(|keyword| text_lower.contains(*keyword))
        .map(|keyword| {
            let mut title = String::new();
            let mut chars = keyword.chars();
            if let Some(first) = chars.next() {
                title.extend(first.to_uppercase());
                title.push_str(chars.as_str());
            }
            title
        })
        .collect()
}

fn extract_key_topics(text_lower: &str) -> Vec<String> {
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for word in text_lower.split_whitespace() {
        if word.chars().count() > 4 && word.chars().all(|c| c.is_alphabetic()) {
            *frequency.entry(word).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = frequency.into_iter().collect();
    // Deterministic: frequency descending, then alphabetical.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(TOPIC_CAP)
        .map(|(word, _)| word.to_string())
        .collect()
}

fn date_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").unwrap(),
            Regex::new(r"\b\d{4}[/-]\d{1,2}[/-]\d{1,2}\b").unwrap(),
            Regex::new(
                r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},?\s+\d{4}\b",
            )
            .unwrap(),
        ]
    })
}

fn extract_dates(text: &str) -> Vec<String> {
    let mut dates = Vec::new();
    for pattern in date_patterns() {
        for m in pattern.find_iter(text) {
            let date = m.as_str().to_string();
            if !dates.contains(&date) {
                dates.push(date);
            }
        }
    }
    dates.truncate(DATE_CAP);
    dates
}

fn extract_entities(text: &str) -> Vec<String> {
    let mut entities = Vec::new();

    for line in text.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        for (i, word) in words.iter().enumerate() {
            let starts_upper = word.chars().next().is_some_and(|c| c.is_uppercase());
            if !starts_upper || word.chars().count() <= 2 {
                continue;
            }

            let mut entity_words = vec![*word];
            for &next in &words[i + 1..] {
                if next.chars().next().is_some_and(|c| c.is_uppercase()) {
                    entity_words.push(next);
                } else {
                    break;
                }
            }

            if entity_words.len() >= 2 {
                let entity = entity_words.join(" ");
                if !entities.contains(&entity) {
                    entities.push(entity);
                }
            }
        }
    }

    entities.truncate(ENTITY_CAP);
    entities
}

fn generate_summary(text: &str) -> String {
    let sentences: Vec<&str> = text.split('.').collect();
    let summary = if sentences.len() > 3 {
        let mut leading = sentences[..3].join(".");
        leading.push('.');
        leading
    } else {
        text.to_string()
    };

    cap_with_ellipsis(&summary, SUMMARY_CAP)
}

fn cap_with_ellipsis(text: &str, cap: usize) -> String {
    if text.len() <= cap {
        return text.to_string();
    }
    let mut end = cap;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

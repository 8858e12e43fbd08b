//! Document-type classification

use serde::{Deserialize, Serialize};

/// Keyword set whose distinct-occurrence count drives the insurance
/// classification
pub const INSURANCE_KEYWORDS: &[&str] = &[
    "insurance",
    "policy",
    "coverage",
    "premium",
    "claim",
    "benefits",
    "exclusions",
    "policy period",
    "sum insured",
    "policyholder",
    "insured",
    "waiting period",
    "grace period",
    "cumulative bonus",
    "portability",
    "renewal",
    "deductible",
];

/// Minimum distinct insurance keywords required for the insurance category
const INSURANCE_THRESHOLD: usize = 3;

/// Document categories recognized by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Insurance policy; the only category with structured field rules
    InsurancePolicy,
    /// Contracts and agreements
    LegalContract,
    /// HR and employment documents
    HrDocument,
    /// Compliance and regulatory documents
    ComplianceDocument,
    /// Everything else
    General,
}

impl DocumentType {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::InsurancePolicy => "Insurance Policy",
            Self::LegalContract => "Legal Contract",
            Self::HrDocument => "HR Document",
            Self::ComplianceDocument => "Compliance Document",
            Self::General => "General Document",
        }
    }
}

/// Single-keyword fall-through tests, checked in order after the insurance
/// count fails the threshold
const FALLTHROUGH_RULES: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::LegalContract,
        &["contract", "agreement", "terms", "conditions"],
    ),
    (
        DocumentType::HrDocument,
        &["employment", "hr", "human resources", "employee"],
    ),
    (
        DocumentType::ComplianceDocument,
        &["compliance", "regulation", "regulatory", "legal"],
    ),
];

/// Classify a document from its lowercased text
///
/// The insurance count runs first, so no later rule can override it; the
/// original system's order-dependent Resume/CV re-classification heuristic
/// is intentionally absent.
pub fn detect_document_type(text_lower: &str) -> DocumentType {
    let insurance_count = INSURANCE_KEYWORDS
        .iter()
        .filter(|keyword| text_lower.contains(*keyword))
        .count();

    if insurance_count >= INSURANCE_THRESHOLD {
        return DocumentType::InsurancePolicy;
    }

    for (doc_type, keywords) in FALLTHROUGH_RULES {
        if keywords.iter().any(|keyword| text_lower.contains(keyword)) {
            return *doc_type;
        }
    }

    DocumentType::General
}

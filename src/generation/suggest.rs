//! Advisory query-type suggestion
//!
//! A pure classifier over question text. Its output is only ever appended
//! to answer text as a note; it must never influence routing.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::QueryType;

/// Regex family per category, checked in order; exclusion phrasing is
/// tested before coverage so "not covered" does not read as coverage
fn families() -> &'static Vec<(QueryType, Regex)> {
    static FAMILIES: OnceLock<Vec<(QueryType, Regex)>> = OnceLock::new();
    FAMILIES.get_or_init(|| {
        vec![
            (
                QueryType::Exclusions,
                Regex::new(r"(?i)\b(exclusions?|excluded?|not covered|limitations?)\b").unwrap(),
            ),
            (
                QueryType::Coverage,
                Regex::new(r"(?i)\b(coverage|covered|covers|benefits?|protection)\b").unwrap(),
            ),
            (
                QueryType::Claims,
                Regex::new(r"(?i)\b(claims?|claiming|reimbursements?)\b").unwrap(),
            ),
            (
                QueryType::Premium,
                Regex::new(r"(?i)\b(premiums?|costs?|price|payments?|fees?)\b").unwrap(),
            ),
            (
                QueryType::Duration,
                Regex::new(r"(?i)\b(how long|durations?|periods?|terms? of|expir(?:y|es|ation))\b")
                    .unwrap(),
            ),
            (
                QueryType::Terms,
                Regex::new(r"(?i)\bterms?\s*(?:and|&)\s*conditions\b").unwrap(),
            ),
            (
                QueryType::Definitions,
                Regex::new(r"(?i)\b(define[ds]?|definitions?|meanings?|means?)\b").unwrap(),
            ),
        ]
    })
}

/// Suggest a more specific query type for a question, when one fits
///
/// Returns `None` for questions that match no category family.
pub fn suggest_query_type(question: &str) -> Option<QueryType> {
    families()
        .iter()
        .find(|(_, pattern)| pattern.is_match(question))
        .map(|(query_type, _)| *query_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_specific_categories() {
        assert_eq!(
            suggest_query_type("What benefits does this plan include?"),
            Some(QueryType::Coverage)
        );
        assert_eq!(
            suggest_query_type("How do I file a claim?"),
            Some(QueryType::Claims)
        );
        assert_eq!(
            suggest_query_type("How long is the waiting period?"),
            Some(QueryType::Duration)
        );
        assert_eq!(
            suggest_query_type("What does 'insured person' mean here?"),
            Some(QueryType::Definitions)
        );
    }

    #[test]
    fn exclusion_phrasing_wins_over_coverage() {
        assert_eq!(
            suggest_query_type("What is not covered by this policy?"),
            Some(QueryType::Exclusions)
        );
    }

    #[test]
    fn unmatched_questions_yield_none() {
        assert_eq!(suggest_query_type("What color is the cover page?"), None);
        assert_eq!(suggest_query_type(""), None);
    }
}

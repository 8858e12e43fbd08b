//! Section-scan rules and the duration preference filter

use std::sync::OnceLock;

use regex::Regex;

/// Keywords marking a snippet as duration/term-like
pub const DURATION_KEYWORDS: &[&str] =
    &["duration", "period", "term", "policy term", "policy period"];

/// Minimum trimmed length for a line to count as section content
const MIN_CONTENT_LEN: usize = 2;

/// Minimum trimmed length for a line to be kept as a field snippet
const MIN_SNIPPET_LEN: usize = 10;

/// Lines longer than this cannot be section headers unless they end with a
/// colon; keeps keyword-bearing prose from being mistaken for a title
const MAX_HEADER_LEN: usize = 40;

/// Section-scan rule: which header substrings open a field's section and
/// how many snippets the field keeps
pub struct SectionRule {
    /// Case-insensitive substrings that mark a section header line
    pub headers: &'static [&'static str],
    /// Maximum snippets retained
    pub cap: usize,
}

/// Numeric duration pattern: `<digits> (year|month|day)(s)?`
pub fn duration_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*(year|years|month|months|day|days)").unwrap())
}

/// Whether a snippet mentions a duration keyword (case-insensitive)
pub fn has_duration_keyword(snippet: &str) -> bool {
    let lower = snippet.to_lowercase();
    DURATION_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Whether a snippet contains a numeric duration like "12 months"
pub fn has_duration_pattern(snippet: &str) -> bool {
    duration_pattern().is_match(&snippet.to_lowercase())
}

/// Two-tier duration preference over candidate snippets
///
/// Tier one keeps snippets with a duration keyword AND a numeric duration
/// pattern; when the pattern never matches, tier two falls back to
/// keyword-only matches; with no keyword matches at all the result is
/// empty. Precision over recall for ambiguous duration phrasing.
pub fn prefer_duration(snippets: &[String]) -> Vec<String> {
    let keyword_matches: Vec<&String> = snippets
        .iter()
        .filter(|s| has_duration_keyword(s))
        .collect();

    let pattern_matches: Vec<String> = keyword_matches
        .iter()
        .filter(|s| has_duration_pattern(s))
        .map(|s| (*s).clone())
        .collect();

    if !pattern_matches.is_empty() {
        return pattern_matches;
    }

    keyword_matches.into_iter().cloned().collect()
}

fn looks_like_header(line: &str) -> bool {
    line.ends_with(':') || line.chars().count() <= MAX_HEADER_LEN
}

/// Locate a titled section and collect its content lines
///
/// A header-like line (short, or colon-terminated) containing any header
/// substring opens the section and is itself skipped. Subsequent trimmed
/// lines longer than two characters are collected; the first blank or
/// trivially short line after content has been collected ends the section.
///
/// Documents without titled sections (prose on one line) fall back to a
/// sentence scan: every sentence mentioning a header phrase is collected.
pub fn find_section(text: &str, headers: &[&str]) -> Vec<String> {
    let mut in_section = false;
    let mut saw_header = false;
    let mut content = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        let line_lower = trimmed.to_lowercase();

        if looks_like_header(trimmed) && headers.iter().any(|h| line_lower.contains(h)) {
            in_section = true;
            saw_header = true;
            continue;
        }

        if in_section {
            if trimmed.len() > MIN_CONTENT_LEN {
                content.push(trimmed.to_string());
            } else if !content.is_empty() {
                break;
            }
        }
    }

    if saw_header {
        return content;
    }

    text.split('.')
        .map(str::trim)
        .filter(|sentence| sentence.len() > MIN_CONTENT_LEN)
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            headers.iter().any(|h| lower.contains(h))
        })
        .map(str::to_string)
        .collect()
}

/// Extract a field's snippet list: section content lines long enough to be
/// meaningful, capped
pub fn extract_field(text: &str, rule: &SectionRule) -> Vec<String> {
    let mut snippets: Vec<String> = find_section(text, rule.headers)
        .into_iter()
        .filter(|line| line.len() > MIN_SNIPPET_LEN)
        .collect();
    snippets.truncate(rule.cap);
    snippets
}

/// Uncapped variant for fields that apply the duration preference before
/// capping
pub fn extract_field_uncapped(text: &str, headers: &[&str]) -> Vec<String> {
    find_section(text, headers)
        .into_iter()
        .filter(|line| line.len() > MIN_SNIPPET_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: &str = "\
ACME Health Policy

Coverage Details:
Hospitalization expenses are covered up to the sum insured.
Day care procedures are included.

Exclusions:
Cosmetic surgery is not covered.
";

    #[test]
    fn section_collection_stops_at_blank_line() {
        let lines = find_section(POLICY, &["coverage"]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Hospitalization"));
        assert!(!lines.iter().any(|l| l.contains("Cosmetic")));
    }

    #[test]
    fn missing_section_yields_nothing() {
        assert!(find_section(POLICY, &["claims"]).is_empty());
    }

    #[test]
    fn keyword_bearing_prose_is_not_a_header() {
        let text = "Claims Process:\nClaims must be submitted within 30 days of discharge.\n";
        let lines = find_section(text, &["claims"]);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("30 days"));
    }

    #[test]
    fn prose_without_titled_sections_falls_back_to_sentences() {
        let text = "This policy's coverage includes hospitalization. \
                    Exclusions: cosmetic surgery. Claims: submit within 30 days.";
        let coverage = find_section(text, &["coverage"]);
        assert_eq!(coverage.len(), 1);
        assert!(coverage[0].contains("hospitalization"));

        let claims = find_section(text, &["claims"]);
        assert_eq!(claims.len(), 1);
        assert!(claims[0].contains("30 days"));
    }

    #[test]
    fn field_extraction_caps_snippets() {
        let text = "Benefits:\naaaaaaaaaaaaaaa one\nbbbbbbbbbbbbbbb two\nccccccccccccccc three\n";
        let rule = SectionRule {
            headers: &["benefits"],
            cap: 2,
        };
        assert_eq!(extract_field(text, &rule).len(), 2);
    }

    #[test]
    fn preference_picks_pattern_matches_first() {
        let snippets = vec![
            "The policy period is stated in the schedule".to_string(),
            "Policy period: 12 months from inception".to_string(),
        ];
        let preferred = prefer_duration(&snippets);
        assert_eq!(preferred, vec![snippets[1].clone()]);
    }

    #[test]
    fn preference_falls_back_to_keyword_matches() {
        let snippets = vec![
            "Renewal happens automatically".to_string(),
            "The policy period is stated in the schedule".to_string(),
        ];
        let preferred = prefer_duration(&snippets);
        assert_eq!(preferred, vec![snippets[1].clone()]);
    }

    #[test]
    fn preference_is_empty_without_keywords() {
        let snippets = vec!["Renewal happens automatically".to_string()];
        assert!(prefer_duration(&snippets).is_empty());
    }

    #[test]
    fn duration_pattern_matches_plurals_and_singulars() {
        assert!(has_duration_pattern("valid for 1 year"));
        assert!(has_duration_pattern("expires in 30 days"));
        assert!(has_duration_pattern("Policy Period: 12 Months"));
        assert!(!has_duration_pattern("valid for one year"));
    }
}

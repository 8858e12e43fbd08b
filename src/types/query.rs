//! Query-type hints for routing and prompt selection

use serde::{Deserialize, Serialize};

/// Query-type hint supplied by the caller
///
/// Drives both the structured-lookup rule table and the system instruction
/// template used for generation. Unknown hints are treated as `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// No specialization
    General,
    /// Coverage, benefits, what is included
    Coverage,
    /// Exclusions, limitations, what is not covered
    Exclusions,
    /// Claims procedures and requirements
    Claims,
    /// Premium, cost, payment
    Premium,
    /// Policy period, term, duration
    Duration,
    /// Terms and conditions
    Terms,
    /// Defined terms and their meanings
    Definitions,
}

impl QueryType {
    /// Parse a hint string; anything unrecognized falls back to `General`
    pub fn parse(hint: &str) -> Self {
        match hint.trim().to_lowercase().as_str() {
            "coverage" => Self::Coverage,
            "exclusions" => Self::Exclusions,
            "claims" => Self::Claims,
            "premium" => Self::Premium,
            "duration" => Self::Duration,
            "terms" => Self::Terms,
            "definitions" => Self::Definitions,
            _ => Self::General,
        }
    }

    /// Stable lowercase name, matching the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Coverage => "coverage",
            Self::Exclusions => "exclusions",
            Self::Claims => "claims",
            Self::Premium => "premium",
            Self::Duration => "duration",
            Self::Terms => "terms",
            Self::Definitions => "definitions",
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for QueryType {
    fn default() -> Self {
        Self::General
    }
}

//! Structured keyword-search instructions

use super::fields::default_fields;
use serde::{Deserialize, Serialize};

/// Field-scoped, token-based search filter produced per request.
///
/// Tokens are ANDed together, fields are ORed, and every (token, field)
/// pair is a substring match. `fields` is never empty once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDirective {
    /// Literal substrings to look for, in input order
    pub tokens: Vec<String>,

    /// Allow-listed field names to look in
    pub fields: Vec<String>,
}

impl SearchDirective {
    /// Classifier-independent directive: whitespace tokens over every field
    pub fn fallback(raw: &str) -> Self {
        Self {
            tokens: tokenize(raw),
            fields: default_fields(),
        }
    }

    /// True when there is nothing to match (caller treats as match-all)
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Where a resolved directive came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveSource {
    /// Sanitized intent classifier output
    Classifier,
    /// Deterministic whitespace tokenization
    Fallback,
}

/// Split on runs of any whitespace, dropping empty segments
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

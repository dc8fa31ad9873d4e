//! Keyword filter construction and evaluation
//!
//! Turns a [`SearchDirective`] into an AND-of-ORs of substring tests, either
//! rendered as an ORM `where` clause or evaluated against JSON records.

use super::directive::SearchDirective;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Substring matching policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    CaseInsensitive,
    CaseSensitive,
}

/// Boolean filter over record fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpr {
    /// Every child matches; an empty list matches everything
    And(Vec<FilterExpr>),
    /// Any child matches; an empty list matches nothing
    Or(Vec<FilterExpr>),
    /// Field text contains `value`
    Contains { field: String, value: String },
}

impl FilterExpr {
    /// AND over tokens, OR over fields
    pub fn from_directive(directive: &SearchDirective) -> Self {
        FilterExpr::And(
            directive
                .tokens
                .iter()
                .map(|token| {
                    FilterExpr::Or(
                        directive
                            .fields
                            .iter()
                            .map(|field| FilterExpr::Contains {
                                field: field.clone(),
                                value: token.clone(),
                            })
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    /// Render as `{AND: [{OR: [{Field: {contains: token}}]}]}`
    pub fn to_where_clause(&self) -> Value {
        match self {
            FilterExpr::And(children) => {
                json!({ "AND": children.iter().map(Self::to_where_clause).collect::<Vec<_>>() })
            }
            FilterExpr::Or(children) => {
                json!({ "OR": children.iter().map(Self::to_where_clause).collect::<Vec<_>>() })
            }
            FilterExpr::Contains { field, value } => {
                let mut clause = Map::new();
                clause.insert(field.clone(), json!({ "contains": value }));
                Value::Object(clause)
            }
        }
    }

    /// Evaluate against a JSON object record
    pub fn matches(&self, record: &Value, mode: MatchMode) -> bool {
        match self {
            FilterExpr::And(children) => children.iter().all(|c| c.matches(record, mode)),
            FilterExpr::Or(children) => children.iter().any(|c| c.matches(record, mode)),
            FilterExpr::Contains { field, value } => match field_text(record, field) {
                Some(text) => contains(&text, value, mode),
                None => false,
            },
        }
    }
}

/// Searchable text of a record field; null, nested, and missing fields have none
fn field_text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn contains(haystack: &str, needle: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::CaseSensitive => haystack.contains(needle),
        MatchMode::CaseInsensitive => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

/// Records matching `expr`, in input order, at most `limit` of them
pub fn filter_records<'a>(
    records: &'a [Value],
    expr: &FilterExpr,
    mode: MatchMode,
    limit: Option<usize>,
) -> Vec<&'a Value> {
    records
        .iter()
        .filter(|r| expr.matches(r, mode))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

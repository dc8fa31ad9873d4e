//! Keyword search resolution
//!
//! Free-text search input becomes a [`SearchDirective`] (tokens + fields),
//! which callers turn into a filter with [`FilterExpr`].

mod directive;
mod fields;
mod filter;
mod resolver;

pub use directive::{tokenize, DirectiveSource, SearchDirective};
pub use fields::{default_fields, is_searchable_field, DEFAULT_SEARCH_FIELDS};
pub use filter::{filter_records, FilterExpr, MatchMode};
pub use resolver::{
    resolve_search, sanitize, KeywordResolver, Resolution, DEFAULT_CLASSIFIER_TIMEOUT,
};

//! Leadsearch Core Library
//!
//! Keyword search resolution for CRM customer listings.
//!
//! # Features
//! - AI-assisted intent classification (Gemini or OpenAI-compatible services)
//! - Field allow-list shared by the classifier prompt and validation
//! - Fail-open resolver with timeout, cancellation, and deterministic fallback
//! - AND-of-ORs substring filters, rendered as `where` clauses or evaluated in memory

pub mod config;
pub mod dataset;
pub mod error;
pub mod llm;
pub mod search;

pub use config::{Config, LLMProvider, LLMServiceConfig, SearchConfig};
pub use dataset::load_records;
pub use error::{Error, LeadSearchError, Result};
pub use llm::{
    client_from_config, ClassificationError, GeminiClient, Generation, GenerationRequest,
    HttpIntentClassifier, HttpLLMClient, IntentClassifier, LLMClient, MetricsSnapshot,
    RawDirective,
};
pub use search::{
    default_fields, filter_records, is_searchable_field, resolve_search, DirectiveSource,
    FilterExpr, KeywordResolver, MatchMode, Resolution, SearchDirective, DEFAULT_SEARCH_FIELDS,
};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "leadsearch";

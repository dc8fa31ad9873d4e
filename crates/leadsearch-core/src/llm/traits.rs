//! LLM trait definitions

use crate::error::LeadSearchError;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Keyword-search intent classification trait
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Translate free-text search input into tokens and fields.
    ///
    /// Output is shape-checked but not sanitized against the field
    /// allow-list; that is the resolver's job.
    async fn classify(&self, raw: &str) -> Result<RawDirective, ClassificationError>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Shape-checked classifier output, entries still untrusted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDirective {
    pub tokens: Vec<Value>,
    pub fields: Vec<Value>,
}

/// Why a classification attempt produced nothing usable
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("text-generation service failed: {0}")]
    Service(#[from] LeadSearchError),

    #[error("classification timed out after {0} ms")]
    Timeout(u64),

    #[error("classification cancelled")]
    Cancelled,

    #[error("classifier returned an empty response")]
    EmptyResponse,

    #[error("classifier response is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("classifier response lacks array-typed `tokens` and `fields`")]
    InvalidShape,
}

impl ClassificationError {
    /// Transport, timeout, or cancellation rather than bad output
    pub fn is_service_failure(&self) -> bool {
        matches!(self, Self::Service(_) | Self::Timeout(_) | Self::Cancelled)
    }
}

//! Fail-open keyword search resolution
//!
//! Wraps the intent classifier with allow-list sanitization and a
//! deterministic fallback. Resolution never fails: a dead, slow, or
//! hallucinating classifier only makes the directive broader.

use super::directive::{tokenize, DirectiveSource, SearchDirective};
use super::fields::{default_fields, is_searchable_field};
use crate::config::Config;
use crate::llm::{ClassificationError, HttpIntentClassifier, IntentClassifier, RawDirective};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Classification budget when none is configured
pub const DEFAULT_CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(5);

/// A resolved directive and the path that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    #[serde(flatten)]
    pub directive: SearchDirective,
    pub source: DirectiveSource,
}

impl Resolution {
    fn fallback(raw: &str) -> Self {
        Self {
            directive: SearchDirective::fallback(raw),
            source: DirectiveSource::Fallback,
        }
    }
}

/// Turns raw search text into a [`SearchDirective`]
#[derive(Clone)]
pub struct KeywordResolver {
    classifier: Option<Arc<dyn IntentClassifier>>,
    timeout: Duration,
}

impl KeywordResolver {
    /// Resolver that consults `classifier` once per non-blank input
    pub fn new(classifier: Arc<dyn IntentClassifier>) -> Self {
        Self {
            classifier: Some(classifier),
            timeout: DEFAULT_CLASSIFIER_TIMEOUT,
        }
    }

    /// Resolver without a classifier; always takes the fallback path
    pub fn offline() -> Self {
        Self {
            classifier: None,
            timeout: DEFAULT_CLASSIFIER_TIMEOUT,
        }
    }

    /// Bound each classification call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from configuration, degrading to offline when no service is usable
    pub fn from_config(config: &Config) -> Self {
        let timeout = Duration::from_millis(config.search.classifier_timeout_ms);

        if !config.search.classifier_enabled {
            tracing::debug!("Intent classifier disabled by configuration");
            return Self::offline().with_timeout(timeout);
        }

        if !config.llm_service.is_configured() {
            tracing::debug!("No text-generation service configured, resolving offline");
            return Self::offline().with_timeout(timeout);
        }

        match HttpIntentClassifier::from_config(&config.llm_service) {
            Ok(classifier) => Self::new(Arc::new(classifier)).with_timeout(timeout),
            Err(e) => {
                tracing::warn!("Intent classifier unavailable ({}), resolving offline", e);
                Self::offline().with_timeout(timeout)
            }
        }
    }

    /// Whether a classifier is attached
    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    /// Resolve with no external cancellation
    pub async fn resolve(&self, raw: &str) -> SearchDirective {
        self.resolve_detailed(raw, &CancellationToken::new())
            .await
            .directive
    }

    /// Resolve, abandoning the classifier call when `cancel` fires
    pub async fn resolve_with_cancel(&self, raw: &str, cancel: &CancellationToken) -> SearchDirective {
        self.resolve_detailed(raw, cancel).await.directive
    }

    /// Resolve and report which path produced the directive
    pub async fn resolve_detailed(&self, raw: &str, cancel: &CancellationToken) -> Resolution {
        // Blank input never reaches the classifier.
        if raw.trim().is_empty() {
            return Resolution::fallback(raw);
        }

        let Some(classifier) = self.classifier.as_deref() else {
            return Resolution::fallback(raw);
        };

        match classify_bounded(classifier, raw, self.timeout, cancel).await {
            Ok(output) => {
                let directive = sanitize(raw, output);
                tracing::info!(
                    "Resolved '{}' → tokens={:?} fields={:?}",
                    raw,
                    directive.tokens,
                    directive.fields
                );
                Resolution {
                    directive,
                    source: DirectiveSource::Classifier,
                }
            }
            Err(e) => {
                tracing::warn!("Intent classification failed ({}), using fallback search", e);
                Resolution::fallback(raw)
            }
        }
    }
}

/// One-shot resolution against an existing classifier
pub async fn resolve_search(classifier: Arc<dyn IntentClassifier>, raw: &str) -> SearchDirective {
    KeywordResolver::new(classifier).resolve(raw).await
}

async fn classify_bounded(
    classifier: &dyn IntentClassifier,
    raw: &str,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<RawDirective, ClassificationError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClassificationError::Cancelled),
        outcome = tokio::time::timeout(timeout, classifier.classify(raw)) => match outcome {
            Ok(result) => result,
            Err(_) => Err(ClassificationError::Timeout(timeout.as_millis() as u64)),
        },
    }
}

/// Apply the allow-list and token rules to classifier output
pub fn sanitize(raw_input: &str, output: RawDirective) -> SearchDirective {
    let mut tokens: Vec<String> = output
        .tokens
        .into_iter()
        .filter_map(|t| match t {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .collect();

    if tokens.is_empty() {
        tracing::debug!("Classifier proposed no usable tokens, tokenizing input");
        tokens = tokenize(raw_input);
    }

    let mut fields: Vec<String> = Vec::new();
    let mut dropped: Vec<Value> = Vec::new();
    for field in output.fields {
        match field {
            Value::String(name) if is_searchable_field(&name) => {
                if !fields.contains(&name) {
                    fields.push(name);
                }
            }
            other => dropped.push(other),
        }
    }

    if !dropped.is_empty() {
        tracing::warn!("Dropped fields outside the allow-list: {:?}", dropped);
    }

    if fields.is_empty() {
        fields = default_fields();
    }

    SearchDirective { tokens, fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::DEFAULT_SEARCH_FIELDS;
    use serde_json::json;

    fn raw(tokens: Value, fields: Value) -> RawDirective {
        RawDirective {
            tokens: tokens.as_array().cloned().unwrap_or_default(),
            fields: fields.as_array().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_sanitize_drops_unknown_fields() {
        let directive = sanitize(
            "premium lead",
            raw(
                json!(["premium"]),
                json!(["Description", "NotARealField", "Campaign"]),
            ),
        );
        assert_eq!(directive.fields, vec!["Description", "Campaign"]);
        assert_eq!(directive.tokens, vec!["premium"]);
    }

    #[test]
    fn test_sanitize_all_bogus_fields_restores_defaults() {
        let directive = sanitize("x", raw(json!(["x"]), json!(["Bogus1", "Bogus2"])));
        assert_eq!(directive.fields, DEFAULT_SEARCH_FIELDS);
    }

    #[test]
    fn test_sanitize_empty_fields_restores_defaults() {
        let directive = sanitize("x", raw(json!(["x"]), json!([])));
        assert_eq!(directive.fields, DEFAULT_SEARCH_FIELDS);
    }

    #[test]
    fn test_sanitize_tokens_keep_order_and_duplicates() {
        let directive = sanitize(
            "a b a",
            raw(json!(["b", "", "  ", null, 42, "a", "b"]), json!(["City"])),
        );
        assert_eq!(directive.tokens, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_sanitize_tokens_are_not_trimmed() {
        let directive = sanitize("andheri west", raw(json!([" andheri west"]), json!(["City"])));
        assert_eq!(directive.tokens, vec![" andheri west"]);
    }

    #[test]
    fn test_sanitize_no_tokens_uses_input() {
        let directive = sanitize("pune villa", raw(json!([]), json!(["City"])));
        assert_eq!(directive.tokens, vec!["pune", "villa"]);
        assert_eq!(directive.fields, vec!["City"]);
    }

    #[test]
    fn test_sanitize_dedups_fields() {
        let directive = sanitize("x", raw(json!(["x"]), json!(["City", "City", 3, "Price"])));
        assert_eq!(directive.fields, vec!["City", "Price"]);
    }

    #[tokio::test]
    async fn test_offline_resolver_falls_back() {
        let resolver = KeywordResolver::offline();
        assert!(!resolver.has_classifier());

        let resolution = resolver
            .resolve_detailed("mumbai lead", &CancellationToken::new())
            .await;
        assert_eq!(resolution.source, DirectiveSource::Fallback);
        assert_eq!(resolution.directive.tokens, vec!["mumbai", "lead"]);
    }

    #[test]
    fn test_resolution_serializes_flat() {
        let resolution = Resolution::fallback("ref");
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["tokens"], json!(["ref"]));
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["fields"].as_array().unwrap().len(), DEFAULT_SEARCH_FIELDS.len());
    }

    #[test]
    fn test_from_config_without_service_is_offline() {
        let mut config = Config::default();
        config.llm_service.api_key = None;
        config.llm_service.url = None;
        assert!(!KeywordResolver::from_config(&config).has_classifier());

        let mut disabled = Config::default();
        disabled.llm_service.api_key = Some("key".into());
        disabled.search.classifier_enabled = false;
        assert!(!KeywordResolver::from_config(&disabled).has_classifier());
    }
}

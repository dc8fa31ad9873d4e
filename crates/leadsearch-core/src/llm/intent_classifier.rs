//! HTTP-based intent classifier using an external text-generation service

use super::prompt::build_classification_prompt;
use super::{ClassificationError, GenerationRequest, IntentClassifier, LLMClient, RawDirective};
use crate::config::LLMServiceConfig;
use crate::error::Result;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

lazy_static! {
    static ref CODE_FENCE_RE: Regex = Regex::new(r"```[A-Za-z0-9_+-]*").unwrap();
}

/// Intent classifier backed by a text-generation client
pub struct HttpIntentClassifier {
    client: Arc<dyn LLMClient>,
    model: String,
}

impl HttpIntentClassifier {
    /// Create from LLM client, using the client's model
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        let model = client.model_name().to_string();
        Self { client, model }
    }

    /// Create from configuration
    pub fn from_config(config: &LLMServiceConfig) -> Result<Self> {
        let client = super::client_from_config(config)?;
        Ok(Self::new(client))
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(&LLMServiceConfig::default())
    }
}

#[async_trait]
impl IntentClassifier for HttpIntentClassifier {
    async fn classify(&self, raw: &str) -> std::result::Result<RawDirective, ClassificationError> {
        let prompt = build_classification_prompt(raw);
        tracing::debug!("Classifying {} chars with {}", raw.len(), self.model);

        let generation = self
            .client
            .generate(GenerationRequest::new(self.model.as_str(), prompt))
            .await?;

        parse_classifier_response(&generation.text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Remove Markdown code-fence delimiters (tagged or not) and trim
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE_RE.replace_all(raw, "").trim().to_string()
}

/// Parse raw classifier text into a shape-checked directive
pub fn parse_classifier_response(
    text: &str,
) -> std::result::Result<RawDirective, ClassificationError> {
    if text.trim().is_empty() {
        return Err(ClassificationError::EmptyResponse);
    }

    let cleaned = strip_code_fences(text);
    let parsed: Value = serde_json::from_str(&cleaned).map_err(|e| {
        tracing::warn!("Failed to parse classifier JSON: {}", e);
        tracing::debug!("Response was: {}", text);
        ClassificationError::MalformedJson(e)
    })?;

    match (parsed.get("tokens"), parsed.get("fields")) {
        (Some(Value::Array(tokens)), Some(Value::Array(fields))) => Ok(RawDirective {
            tokens: tokens.clone(),
            fields: fields.clone(),
        }),
        _ => Err(ClassificationError::InvalidShape),
    }
}

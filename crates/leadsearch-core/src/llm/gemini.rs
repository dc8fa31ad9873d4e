//! Google Generative Language (`generateContent`) client

use super::client::{build_http_client, APIMetrics, MetricsSnapshot};
use super::{Generation, GenerationRequest, LLMClient};
use crate::config::LLMServiceConfig;
use crate::error::{LeadSearchError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Gemini text-generation client
pub struct GeminiClient {
    http_client: reqwest::Client,
    config: LLMServiceConfig,
    metrics: Arc<APIMetrics>,
}

impl GeminiClient {
    /// Create new client from configuration; an API key is mandatory
    pub fn new(config: LLMServiceConfig) -> Result<Self> {
        if config.api_key.is_none() {
            return Err(LeadSearchError::Config(
                "Gemini provider requires LEADSEARCH_LLM_API_KEY or GEMINI_API_KEY".to_string(),
            ));
        }

        Ok(Self {
            http_client: build_http_client(&config)?,
            config,
            metrics: Arc::new(APIMetrics::default()),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LLMServiceConfig::default())
    }

    /// Get current API metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

fn endpoint(base_url: &str, model: &str) -> String {
    let model = if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    };
    format!("{}/v1beta/{}:generateContent", base_url, model)
}

fn content_request(prompt: String) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part { text: Some(prompt) }],
        }],
    }
}

/// Concatenated text parts of the first candidate; empty when there is none
fn response_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<Generation> {
        let start = Instant::now();
        self.metrics.record_request();

        let url = endpoint(self.config.base_url(), &request.model);
        let mut req = self
            .http_client
            .post(&url)
            .json(&content_request(request.prompt));

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("x-goog-api-key", api_key);
        }

        let response = req.send().await.map_err(|e| {
            self.metrics.record_error();
            LeadSearchError::Http(e)
        })?;

        if !response.status().is_success() {
            self.metrics.record_error();
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LeadSearchError::ExternalError(format!(
                "Gemini error (HTTP {}): {}",
                status, body
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            self.metrics.record_error();
            LeadSearchError::Http(e)
        })?;

        self.metrics.record_latency(start);

        Ok(Generation {
            text: response_text(body),
        })
    }

    fn model_name(&self) -> &str {
        self.config.model_name()
    }
}

//! HTTP clients for external text-generation services

use crate::config::{LLMProvider, LLMServiceConfig};
use crate::error::{LeadSearchError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Trait for text-generation service clients
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Submit one prompt and return the generated text
    async fn generate(&self, request: GenerationRequest) -> Result<Generation>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Single-prompt generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}

/// Generated text, possibly empty
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Generation {
    pub text: String,
}

/// API metrics for monitoring
#[derive(Debug, Default)]
pub struct APIMetrics {
    pub total_requests: AtomicU64,
    pub total_errors: AtomicU64,
    pub total_latency_ms: AtomicU64,
}

impl APIMetrics {
    pub(crate) fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_error(&self) {
        self.total_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_latency(&self, start: Instant) {
        let elapsed = start.elapsed().as_millis() as u64;
        self.total_latency_ms.fetch_add(elapsed, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.total_requests.load(Ordering::Relaxed);

        MetricsSnapshot {
            total_requests: total,
            total_errors: self.total_errors.load(Ordering::Relaxed),
            avg_latency_ms: if total > 0 {
                self.total_latency_ms.load(Ordering::Relaxed) as f64 / total as f64
            } else {
                0.0
            },
        }
    }
}

/// Snapshot of API metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub total_errors: u64,
    pub avg_latency_ms: f64,
}

pub(crate) fn build_http_client(config: &LLMServiceConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(LeadSearchError::Http)
}

/// OpenAI-compatible chat-completions client (OpenAI, vLLM, Ollama, ...)
pub struct HttpLLMClient {
    http_client: reqwest::Client,
    config: LLMServiceConfig,
    metrics: Arc<APIMetrics>,
}

impl HttpLLMClient {
    /// Create new client from configuration
    pub fn new(config: LLMServiceConfig) -> Result<Self> {
        let http_client = build_http_client(&config)?;

        Ok(Self {
            http_client,
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

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

fn chat_request(request: GenerationRequest) -> ChatRequest {
    ChatRequest {
        model: request.model,
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: request.prompt,
        }],
        temperature: 0.0,
    }
}

fn chat_text(response: ChatResponse) -> Result<Generation> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LeadSearchError::Llm("No response from LLM".to_string()))?;

    Ok(Generation {
        text: choice.message.content.unwrap_or_default(),
    })
}

#[async_trait]
impl LLMClient for HttpLLMClient {
    async fn generate(&self, request: GenerationRequest) -> Result<Generation> {
        let start = Instant::now();
        self.metrics.record_request();

        let url = format!("{}/v1/chat/completions", self.config.base_url());
        let mut req = self.http_client.post(&url).json(&chat_request(request));

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
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
                "LLM service error (HTTP {}): {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            self.metrics.record_error();
            LeadSearchError::Http(e)
        })?;

        let generation = chat_text(chat_response).inspect_err(|_| self.metrics.record_error())?;

        self.metrics.record_latency(start);
        tracing::debug!(
            "Chat completion returned {} chars in {:?}",
            generation.text.len(),
            start.elapsed()
        );

        Ok(generation)
    }

    fn model_name(&self) -> &str {
        self.config.model_name()
    }
}

/// Build the client for the configured provider
pub fn client_from_config(config: &LLMServiceConfig) -> Result<Arc<dyn LLMClient>> {
    let client: Arc<dyn LLMClient> = match config.provider {
        LLMProvider::Gemini => Arc::new(super::GeminiClient::new(config.clone())?),
        LLMProvider::OpenAi => Arc::new(HttpLLMClient::new(config.clone())?),
    };
    Ok(client)
}

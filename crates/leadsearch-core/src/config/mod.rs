//! Configuration management

use crate::error::{LeadSearchError, Result};
use crate::search::MatchMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Text-generation service used by the intent classifier
    #[serde(default)]
    pub llm_service: LLMServiceConfig,

    /// Keyword search behaviour
    #[serde(default)]
    pub search: SearchConfig,
}

/// Text-generation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    /// Google Generative Language API (`generateContent`)
    Gemini,
    /// OpenAI-compatible `/v1/chat/completions` (OpenAI, vLLM, Ollama, ...)
    OpenAi,
}

impl LLMProvider {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "openai" | "vllm" => Some(Self::OpenAi),
            _ => None,
        }
    }

    fn default_url(self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::OpenAi => "http://localhost:8000",
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "models/gemini-2.5-flash",
            Self::OpenAi => "meta-llama/Llama-3.1-8B-Instruct",
        }
    }
}

/// Text-generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Which wire protocol to speak
    #[serde(default = "default_provider")]
    pub provider: LLMProvider,

    /// Base URL of the service (provider default when unset)
    #[serde(default)]
    pub url: Option<String>,

    /// Model identifier sent with every generation request
    #[serde(default)]
    pub model: Option<String>,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Transport-level request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl LLMServiceConfig {
    /// Base URL, falling back to the provider's public endpoint
    pub fn base_url(&self) -> &str {
        self.url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_url())
            .trim_end_matches('/')
    }

    /// Model identifier, falling back to the provider default
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Whether enough is set to reach a service at all
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() || self.url.is_some()
    }
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        let provider = default_provider();

        Self {
            provider,
            url: std::env::var("LEADSEARCH_LLM_URL").ok(),
            model: std::env::var("LEADSEARCH_LLM_MODEL").ok(),
            api_key: env_api_key(provider),
            timeout_secs: default_timeout(),
        }
    }
}

fn env_api_key(provider: LLMProvider) -> Option<String> {
    std::env::var("LEADSEARCH_LLM_API_KEY").ok().or_else(|| match provider {
        LLMProvider::Gemini => std::env::var("GEMINI_API_KEY").ok(),
        LLMProvider::OpenAi => None,
    })
}

fn default_provider() -> LLMProvider {
    std::env::var("LEADSEARCH_LLM_PROVIDER")
        .ok()
        .and_then(|v| LLMProvider::from_env_value(&v))
        .unwrap_or(LLMProvider::Gemini)
}

fn default_timeout() -> u64 {
    30
}

/// Keyword search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Use the intent classifier at all (false = always fall back)
    #[serde(default = "default_enabled")]
    pub classifier_enabled: bool,

    /// Upper bound on one classification call, in milliseconds
    #[serde(default = "default_classifier_timeout_ms")]
    pub classifier_timeout_ms: u64,

    /// Substring matching policy for in-memory filtering
    #[serde(default)]
    pub match_mode: MatchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            classifier_enabled: default_enabled(),
            classifier_timeout_ms: default_classifier_timeout_ms(),
            match_mode: MatchMode::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_classifier_timeout_ms() -> u64 {
    5_000
}

impl Config {
    /// Load config from `LEADSEARCH_CONFIG` or the default path
    pub fn load() -> Result<Self> {
        let path = std::env::var("LEADSEARCH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());
        Self::load_from(&path)
    }

    /// Load config from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        if config.llm_service.api_key.is_none() {
            config.llm_service.api_key = env_api_key(config.llm_service.provider);
        }
        config.validate()?;
        Ok(config)
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    fn validate(&self) -> Result<()> {
        if self.search.classifier_timeout_ms == 0 {
            return Err(LeadSearchError::Config(
                "search.classifier_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if let Some(ref url) = self.llm_service.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(LeadSearchError::Config(format!(
                    "llm_service.url must be an http(s) URL, got '{}'",
                    url
                )));
            }
        }
        if self.llm_service.timeout_secs == 0 {
            return Err(LeadSearchError::Config(
                "llm_service.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

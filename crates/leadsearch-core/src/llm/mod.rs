//! LLM integration
//!
//! Provides traits and implementations for:
//! - Text generation via external services (Gemini, OpenAI-compatible)
//! - Keyword-search intent classification

mod client;
mod gemini;
mod intent_classifier;
mod prompt;
mod traits;

pub use client::{
    client_from_config, APIMetrics, Generation, GenerationRequest, HttpLLMClient, LLMClient,
    MetricsSnapshot,
};
pub use gemini::GeminiClient;
pub use intent_classifier::{parse_classifier_response, strip_code_fences, HttpIntentClassifier};
pub use prompt::{build_classification_prompt, keyword_search_prompt};
pub use traits::*;

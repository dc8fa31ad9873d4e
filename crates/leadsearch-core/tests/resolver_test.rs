//! Integration tests for keyword search resolution
//!
//! Drives the resolver through scripted text-generation clients so every
//! failure path is exercised without a network.

use async_trait::async_trait;
use leadsearch_core::{
    DirectiveSource, Generation, GenerationRequest, HttpIntentClassifier, KeywordResolver,
    LLMClient, LeadSearchError, SearchDirective, DEFAULT_SEARCH_FIELDS,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

enum Reply {
    Text(&'static str),
    Fail,
    Hang,
}

struct ScriptedClient {
    reply: Reply,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LLMClient for ScriptedClient {
    async fn generate(&self, _request: GenerationRequest) -> leadsearch_core::Result<Generation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Text(text) => Ok(Generation {
                text: text.to_string(),
            }),
            Reply::Fail => Err(LeadSearchError::ExternalError(
                "LLM service error (HTTP 429): quota exceeded".to_string(),
            )),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Generation::default())
            }
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn resolver_for(client: &Arc<ScriptedClient>) -> KeywordResolver {
    KeywordResolver::new(Arc::new(HttpIntentClassifier::new(client.clone())))
}

fn all_fields() -> Vec<String> {
    DEFAULT_SEARCH_FIELDS.iter().map(|f| f.to_string()).collect()
}

#[tokio::test]
async fn test_service_error_falls_back_to_whitespace_tokens() {
    let client = ScriptedClient::new(Reply::Fail);
    let directive = resolver_for(&client).resolve("mumbai lead").await;

    assert_eq!(
        directive,
        SearchDirective {
            tokens: vec!["mumbai".into(), "lead".into()],
            fields: all_fields(),
        }
    );
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_fenced_response_is_used() {
    let client = ScriptedClient::new(Reply::Text(
        "```json\n{\"tokens\":[\"9876543210\"],\"fields\":[\"ContactNumber\"]}\n```",
    ));
    let resolution = resolver_for(&client)
        .resolve_detailed("phone 9876543210", &CancellationToken::new())
        .await;

    assert_eq!(resolution.source, DirectiveSource::Classifier);
    assert_eq!(resolution.directive.tokens, vec!["9876543210"]);
    assert_eq!(resolution.directive.fields, vec!["ContactNumber"]);
}

#[tokio::test]
async fn test_unknown_fields_are_dropped() {
    let client = ScriptedClient::new(Reply::Text(
        r#"{"tokens":["facebook","premium"],"fields":["Description","NotARealField","Campaign"]}"#,
    ));
    let directive = resolver_for(&client).resolve("facebook campaign premium").await;

    assert_eq!(directive.tokens, vec!["facebook", "premium"]);
    assert_eq!(directive.fields, vec!["Description", "Campaign"]);
}

#[tokio::test]
async fn test_only_bogus_fields_restores_full_list() {
    let client = ScriptedClient::new(Reply::Text(
        r#"{"tokens":["villa"],"fields":["Bogus1","Bogus2"]}"#,
    ));
    let resolution = resolver_for(&client)
        .resolve_detailed("villa", &CancellationToken::new())
        .await;

    assert_eq!(resolution.source, DirectiveSource::Classifier);
    assert_eq!(resolution.directive.fields, all_fields());
}

#[tokio::test]
async fn test_blank_input_skips_classifier() {
    let client = ScriptedClient::new(Reply::Text(r#"{"tokens":["x"],"fields":["City"]}"#));
    let resolver = resolver_for(&client);

    for input in ["", "   ", "\t\n"] {
        let directive = resolver.resolve(input).await;
        assert!(directive.tokens.is_empty());
        assert_eq!(directive.fields, all_fields());
    }
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_token_order_preserved_on_fallback() {
    let client = ScriptedClient::new(Reply::Fail);
    let directive = resolver_for(&client).resolve("zebra apple mango").await;
    assert_eq!(directive.tokens, vec!["zebra", "apple", "mango"]);
}

#[tokio::test]
async fn test_prose_response_falls_back_on_raw_input() {
    let client = ScriptedClient::new(Reply::Text("I cannot help with that"));
    let resolution = resolver_for(&client)
        .resolve_detailed("andheri 2bhk", &CancellationToken::new())
        .await;

    assert_eq!(resolution.source, DirectiveSource::Fallback);
    assert_eq!(resolution.directive.tokens, vec!["andheri", "2bhk"]);
    assert_eq!(resolution.directive.fields, all_fields());
}

#[tokio::test]
async fn test_wrong_shape_and_empty_responses_fall_back() {
    for reply in [
        r#"{"tokens":"pune","fields":["City"]}"#,
        r#"{"query":"pune"}"#,
        "",
        "```json\n```",
    ] {
        let client = ScriptedClient::new(Reply::Text(reply));
        let resolution = resolver_for(&client)
            .resolve_detailed("pune", &CancellationToken::new())
            .await;
        assert_eq!(resolution.source, DirectiveSource::Fallback, "reply {:?}", reply);
        assert_eq!(resolution.directive.tokens, vec!["pune"]);
        assert_eq!(client.calls(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn test_slow_classifier_times_out_into_fallback() {
    let client = ScriptedClient::new(Reply::Hang);
    let resolver = resolver_for(&client).with_timeout(Duration::from_secs(2));

    let started = tokio::time::Instant::now();
    let resolution = resolver
        .resolve_detailed("goa sea view", &CancellationToken::new())
        .await;

    assert_eq!(resolution.source, DirectiveSource::Fallback);
    assert_eq!(resolution.directive.tokens, vec!["goa", "sea", "view"]);
    assert!(started.elapsed() < Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_abandons_classifier_call() {
    let client = ScriptedClient::new(Reply::Hang);
    let resolver = resolver_for(&client).with_timeout(Duration::from_secs(600));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = tokio::time::Instant::now();
    let directive = resolver.resolve_with_cancel("nashik plot", &cancel).await;

    assert_eq!(directive.tokens, vec!["nashik", "plot"]);
    assert_eq!(directive.fields, all_fields());
    assert!(started.elapsed() < Duration::from_secs(600));
}

#[tokio::test]
async fn test_already_cancelled_request() {
    let client = ScriptedClient::new(Reply::Text(r#"{"tokens":["x"],"fields":["City"]}"#));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let resolution = resolver_for(&client).resolve_detailed("x", &cancel).await;
    assert_eq!(resolution.source, DirectiveSource::Fallback);
}

#[tokio::test]
async fn test_each_call_consults_classifier_again() {
    let client = ScriptedClient::new(Reply::Text(r#"{"tokens":["pune"],"fields":["City"]}"#));
    let resolver = resolver_for(&client);

    let first = resolver.resolve("pune").await;
    let second = resolver.resolve("pune").await;

    assert_eq!(first, second);
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn test_resolve_search_free_function() {
    let client = ScriptedClient::new(Reply::Text(r#"{"tokens":["REF-2024"],"fields":["ReferenceId"]}"#));
    let classifier = Arc::new(HttpIntentClassifier::new(client.clone()));

    let directive = leadsearch_core::resolve_search(classifier, "REF-2024").await;
    assert_eq!(directive.fields, vec!["ReferenceId"]);
}

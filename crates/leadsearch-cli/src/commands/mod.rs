//! CLI command handlers

pub mod info;
pub mod resolve;
pub mod search;

use leadsearch_core::{KeywordResolver, Resolution};
use tokio_util::sync::CancellationToken;

/// Resolve `query`, abandoning the classifier call on Ctrl-C
pub(crate) async fn resolve_interruptible(resolver: &KeywordResolver, query: &str) -> Resolution {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let resolution = resolver.resolve_detailed(query, &cancel).await;
    watcher.abort();
    resolution
}

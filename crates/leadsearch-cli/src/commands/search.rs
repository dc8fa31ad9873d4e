//! Search command

use super::resolve_interruptible;
use crate::app::{OutputFormat, SearchArgs};
use crate::output::format_records;
use anyhow::Result;
use leadsearch_core::{filter_records, load_records, Config, FilterExpr, KeywordResolver, MatchMode};

pub async fn run(
    args: SearchArgs,
    resolver: &KeywordResolver,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let records = load_records(&args.data)?;
    let query = args.query.join(" ");

    let resolution = resolve_interruptible(resolver, &query).await;
    if resolution.directive.is_empty() {
        eprintln!("Note: empty search text matches every record.");
    }

    let mode = if args.case_sensitive {
        MatchMode::CaseSensitive
    } else {
        config.search.match_mode
    };

    let expr = FilterExpr::from_directive(&resolution.directive);
    let hits = filter_records(&records, &expr, mode, args.limit);

    tracing::info!(
        "'{}' matched {} of {} records via {:?}",
        query,
        hits.len(),
        records.len(),
        resolution.source
    );

    print!("{}", format_records(&hits, format)?);
    Ok(())
}

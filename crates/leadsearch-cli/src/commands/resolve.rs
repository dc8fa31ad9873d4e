//! Resolve and filter commands

use super::resolve_interruptible;
use crate::app::{OutputFormat, QueryArgs};
use crate::output::format_resolution;
use anyhow::Result;
use leadsearch_core::{FilterExpr, KeywordResolver};

pub async fn run(args: QueryArgs, resolver: &KeywordResolver, format: OutputFormat) -> Result<()> {
    let query = args.query.join(" ");
    let resolution = resolve_interruptible(resolver, &query).await;

    print!("{}", format_resolution(&resolution, format)?);
    Ok(())
}

pub async fn run_filter(args: QueryArgs, resolver: &KeywordResolver) -> Result<()> {
    let query = args.query.join(" ");
    let resolution = resolve_interruptible(resolver, &query).await;

    let where_clause = FilterExpr::from_directive(&resolution.directive).to_where_clause();
    println!("{}", serde_json::to_string_pretty(&where_clause)?);
    Ok(())
}

//! Prompt and field listing commands

use crate::app::OutputFormat;
use anyhow::Result;
use leadsearch_core::llm::keyword_search_prompt;
use leadsearch_core::DEFAULT_SEARCH_FIELDS;

pub fn run_prompt() -> Result<()> {
    println!("{}", keyword_search_prompt());
    Ok(())
}

pub fn run_fields(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(DEFAULT_SEARCH_FIELDS)?),
        OutputFormat::Cli | OutputFormat::Csv => {
            for field in DEFAULT_SEARCH_FIELDS {
                println!("{}", field);
            }
        }
    }
    Ok(())
}

//! JSON output formatter

use anyhow::Result;
use leadsearch_core::Resolution;
use serde_json::Value;

pub fn format_resolution(resolution: &Resolution) -> Result<String> {
    Ok(serde_json::to_string_pretty(resolution)? + "\n")
}

pub fn format_records(records: &[&Value]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)? + "\n")
}

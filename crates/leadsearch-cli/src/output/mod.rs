//! Output formatters

pub mod csv;
pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use anyhow::Result;
use leadsearch_core::Resolution;
use serde_json::Value;

/// Format a resolved directive
pub fn format_resolution(resolution: &Resolution, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format_resolution(resolution),
        OutputFormat::Csv => csv::format_resolution(resolution),
        OutputFormat::Cli => Ok(terminal::format_resolution(resolution)),
    }
}

/// Format matching customer records
pub fn format_records(records: &[&Value], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format_records(records),
        OutputFormat::Csv => csv::format_records(records),
        OutputFormat::Cli => Ok(terminal::format_records(records)),
    }
}

/// Display text of a record field, empty when absent or not scalar
pub(crate) fn field_display(record: &Value, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

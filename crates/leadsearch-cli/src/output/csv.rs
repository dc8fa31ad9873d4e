//! CSV output formatter

use super::field_display;
use anyhow::Result;
use leadsearch_core::{Resolution, DEFAULT_SEARCH_FIELDS};
use serde_json::Value;

pub fn format_resolution(resolution: &Resolution) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(["kind", "value"])?;

    for token in &resolution.directive.tokens {
        writer.write_record(["token", token.as_str()])?;
    }
    for field in &resolution.directive.fields {
        writer.write_record(["field", field.as_str()])?;
    }

    finish(writer)
}

pub fn format_records(records: &[&Value]) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(DEFAULT_SEARCH_FIELDS)?;

    for record in records {
        writer.write_record(
            DEFAULT_SEARCH_FIELDS
                .iter()
                .map(|field| field_display(record, field)),
        )?;
    }

    finish(writer)
}

fn finish(writer: ::csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(String::from_utf8(bytes)?)
}

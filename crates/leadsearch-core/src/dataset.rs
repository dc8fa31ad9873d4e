//! Customer record loading for offline search

use crate::error::{LeadSearchError, Result};
use serde_json::Value;
use std::path::Path;

/// Load a JSON array of customer records.
///
/// A top-level object with a `data` array (a common API envelope) is
/// accepted too.
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    if !path.exists() {
        return Err(LeadSearchError::DatasetNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let parsed: Value = serde_json::from_str(&content)?;

    match parsed {
        Value::Array(records) => Ok(records),
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(LeadSearchError::InvalidInput(format!(
                "{}: expected a JSON array of records",
                path.display()
            ))),
        },
        _ => Err(LeadSearchError::InvalidInput(format!(
            "{}: expected a JSON array of records",
            path.display()
        ))),
    }
}

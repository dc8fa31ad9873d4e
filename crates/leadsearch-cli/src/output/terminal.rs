//! Terminal output formatter

use super::field_display;
use leadsearch_core::{DirectiveSource, Resolution};
use serde_json::Value;

/// Fields shown per record, in order, when present
const SUMMARY_FIELDS: &[&str] = &["customerName", "ContactNumber", "City", "Location", "Description"];

pub fn format_resolution(resolution: &Resolution) -> String {
    let source = match resolution.source {
        DirectiveSource::Classifier => "classifier",
        DirectiveSource::Fallback => "fallback",
    };
    let tokens = if resolution.directive.tokens.is_empty() {
        "(none)".to_string()
    } else {
        resolution.directive.tokens.join(", ")
    };

    format!(
        "source: {}\ntokens: {}\nfields: {}\n",
        source,
        tokens,
        resolution.directive.fields.join(", ")
    )
}

pub fn format_records(records: &[&Value]) -> String {
    let mut output = String::new();

    for record in records {
        let parts: Vec<String> = SUMMARY_FIELDS
            .iter()
            .map(|f| field_display(record, f))
            .filter(|s| !s.is_empty())
            .collect();
        output.push_str(&parts.join(" | "));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadsearch_core::SearchDirective;
    use serde_json::json;

    #[test]
    fn test_resolution_lines() {
        let resolution = Resolution {
            directive: SearchDirective {
                tokens: vec![],
                fields: vec!["City".into(), "Price".into()],
            },
            source: DirectiveSource::Fallback,
        };
        assert_eq!(
            format_resolution(&resolution),
            "source: fallback\ntokens: (none)\nfields: City, Price\n"
        );
    }

    #[test]
    fn test_record_summary_skips_missing() {
        let record = json!({"customerName": "Ravi", "City": "Mumbai", "Price": 10});
        assert_eq!(format_records(&[&record]), "Ravi | Mumbai\n");
        assert_eq!(format_records(&[]), "");
    }
}

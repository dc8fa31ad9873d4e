//! Instruction prompt for the keyword-search intent classifier
//!
//! The field list is rendered from [`DEFAULT_SEARCH_FIELDS`] so the prompt
//! and the resolver's validation can never disagree.

use crate::search::DEFAULT_SEARCH_FIELDS;
use lazy_static::lazy_static;

lazy_static! {
    static ref KEYWORD_SEARCH_PROMPT: String = render_prompt(DEFAULT_SEARCH_FIELDS);
}

/// The fixed classifier instruction
pub fn keyword_search_prompt() -> &'static str {
    KEYWORD_SEARCH_PROMPT.as_str()
}

/// Instruction followed by the user's raw search text
pub fn build_classification_prompt(raw: &str) -> String {
    format!("{}\n\nUser input:\n{}", keyword_search_prompt(), raw)
}

fn render_prompt(fields: &[&str]) -> String {
    let field_list = fields
        .iter()
        .map(|f| format!("- {}", f))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an AI keyword-search assistant for a CRM system.

Your task is to analyze a user's search text and convert it into
structured keyword-search instructions that match the backend logic exactly.

IMPORTANT RULES:
- Do NOT invent new fields
- Do NOT guess database values
- Do NOT perform calculations
- Do NOT change search behavior
- You only decide:
  1. Search tokens
  2. Which fields to search in

SEARCH BEHAVIOR (STRICT):
- Each token must be searched using "contains"
- Tokens are combined using AND
- Fields are combined using OR
- If no specific field is mentioned, ALL default fields must be used

DEFAULT SEARCH FIELDS:
{field_list}

WHEN TO LIMIT FIELDS:
- If the user clearly refers to a specific attribute, narrow the fields
  (example: phone, city, price, reference, name)

OUTPUT FORMAT (JSON ONLY):
{{
  "tokens": ["string"],
  "fields": ["string"]
}}

VALID EXAMPLES:

User: "mumbai lead"
Output:
{{
  "tokens": ["mumbai", "lead"],
  "fields": ["City", "Description"]
}}

User: "9876543210"
Output:
{{
  "tokens": ["9876543210"],
  "fields": ["ContactNumber"]
}}

User: "REF-2024"
Output:
{{
  "tokens": ["REF-2024"],
  "fields": ["ReferenceId"]
}}

User: "facebook campaign premium"
Output:
{{
  "tokens": ["facebook", "premium"],
  "fields": ["Campaign", "CustomerType", "Description"]
}}

If intent is unclear, return ALL default fields.
Return ONLY valid JSON. No explanation."#
    )
}

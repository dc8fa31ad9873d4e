//! Searchable customer fields
//!
//! The single allow-list shared by the classifier prompt and the resolver's
//! validation step.

/// Customer attributes eligible for keyword search, in prompt order
pub const DEFAULT_SEARCH_FIELDS: &[&str] = &[
    "Description",
    "Campaign",
    "CustomerType",
    "CustomerSubType",
    "customerName",
    "ContactNumber",
    "City",
    "Location",
    "SubLocation",
    "Price",
    "ReferenceId",
    "CustomerDate",
];

/// Exact, case-sensitive allow-list membership
pub fn is_searchable_field(name: &str) -> bool {
    DEFAULT_SEARCH_FIELDS.contains(&name)
}

/// Owned copy of the full allow-list
pub fn default_fields() -> Vec<String> {
    DEFAULT_SEARCH_FIELDS.iter().map(|f| f.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_membership_is_case_sensitive() {
        assert!(is_searchable_field("customerName"));
        assert!(is_searchable_field("ContactNumber"));
        assert!(!is_searchable_field("CustomerName"));
        assert!(!is_searchable_field("contactnumber"));
        assert!(!is_searchable_field(""));
    }

    #[test]
    fn test_no_duplicates() {
        let unique: HashSet<_> = DEFAULT_SEARCH_FIELDS.iter().collect();
        assert_eq!(unique.len(), DEFAULT_SEARCH_FIELDS.len());
    }

    #[test]
    fn test_default_fields_matches_constant() {
        let fields = default_fields();
        assert_eq!(fields.len(), DEFAULT_SEARCH_FIELDS.len());
        assert_eq!(fields[0], "Description");
        assert_eq!(fields.last().map(String::as_str), Some("CustomerDate"));
    }
}

//! Data-driven field specifications for extraction and consistency checking.
//!
//! Patterns are kept as data rather than code so new fields can be added
//! without touching the extraction algorithm itself.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial FieldSpec and FieldType.

/// The type classification of an extractable scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Currency,
    Duration,
    Date,
    Percentage,
    Identifier,
    Organization,
    Number,
}

/// A single field's extraction and comparison contract.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub field_type: FieldType,
    pub extraction_patterns: std::vec::Vec<String>,
    pub tolerance: f64,
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: &str, field_type: FieldType, extraction_patterns: &[&str], tolerance: f64, required: bool) -> Self {
        FieldSpec {
            name: name.to_string(),
            field_type,
            extraction_patterns: extraction_patterns.iter().map(|p| p.to_string()).collect(),
            tolerance,
            required,
        }
    }

    /// Runs this field's patterns against `text` in order, returning the
    /// first match's capture group 1 if present, else the whole match, plus
    /// the byte offset the match started at (used as a line-locating hint).
    pub fn extract_first_match<'a>(&self, text: &'a str) -> std::option::Option<(std::string::String, usize)> {
        for pattern in self.extraction_patterns.iter() {
            let compiled = match regex::Regex::new(pattern) {
                std::result::Result::Ok(regex) => regex,
                std::result::Result::Err(_) => continue,
            };
            if let std::option::Option::Some(captures) = compiled.captures(text) {
                let whole = captures.get(0).unwrap();
                let value = captures
                    .get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| whole.as_str().to_string());
                return std::option::Option::Some((value, whole.start()));
            }
        }
        std::option::Option::None
    }
}

/// A standard field-definition set for common procurement scalar fields.
/// Callers may extend or replace this with their own specs.
pub fn default_field_specs() -> std::vec::Vec<FieldSpec> {
    std::vec![
        FieldSpec::new(
            "total_cost",
            FieldType::Currency,
            &[r"(?i)total\s+cost[:\s]+\$?([\d,]+(?:\.\d+)?\s*(?:million|m|billion|b)?)", r"\$\s*([\d,]+(?:\.\d+)?\s*(?:million|m|billion|b)?)"],
            0.05,
            true,
        ),
        FieldSpec::new(
            "period_of_performance",
            FieldType::Duration,
            &[r"(?i)period\s+of\s+performance[:\s]+(\d+\s*(?:year|month|week)s?)", r"(\d+\s*(?:year|month)s?)\s+(?:contract|period)"],
            0.0,
            true,
        ),
        FieldSpec::new(
            "effective_date",
            FieldType::Date,
            &[r"(?i)effective\s+date[:\s]+([\w,\s/\-]+\d{4})"],
            7.0,
            false,
        ),
        FieldSpec::new(
            "contracting_officer",
            FieldType::Identifier,
            &[r"(?i)contracting\s+officer[:\s]+([A-Za-z.\s]+)"],
            0.8,
            false,
        ),
    ]
}

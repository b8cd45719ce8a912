//! Document entity owned by the metadata store.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial Document entity.

/// A generated or uploaded artifact tracked by the metadata store.
///
/// `extracted_data` is intentionally schema-free (a JSON object) — the
/// store persists whatever an agent computed without validating its shape.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub doc_type: String,
    pub program: String,
    pub content: String,
    pub file_path: std::option::Option<String>,
    pub extracted_data: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    pub fn new(
        doc_id: String,
        doc_type: String,
        program: String,
        content: String,
        file_path: std::option::Option<String>,
        extracted_data: serde_json::Value,
    ) -> Self {
        Document {
            doc_id,
            doc_type,
            program,
            content,
            file_path,
            extracted_data,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Replaces characters unsafe for use in an identifier with `_`.
///
/// Used when building `doc_id`s from a free-form program name.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_identifier_replaces_unsafe_chars() {
        assert_eq!(sanitize_identifier("Program Alpha/2026"), "Program_Alpha_2026");
    }

    #[test]
    fn test_sanitize_identifier_keeps_hyphens_and_alphanumerics() {
        assert_eq!(sanitize_identifier("proj-001"), "proj-001");
    }
}

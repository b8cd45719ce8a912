//! Port for the LLM-JSON extraction stage.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial port, following the Err(String) port
//!   convention used throughout this workspace.

/// Capability for prompting a model to emit a JSON object matching a given
/// schema description. Implementations are expected to return the raw model
/// response text; the caller is responsible for locating and parsing JSON
/// within it.
#[async_trait::async_trait]
pub trait JsonCompletionPort: std::marker::Send + std::marker::Sync {
    async fn complete_json(&self, prompt: &str) -> std::result::Result<std::string::String, std::string::String>;
}

/// Finds and parses the first balanced `{...}` object in `text`.
///
/// Scans for the first `{`, then tracks brace depth (ignoring braces inside
/// string literals) until it returns to zero, and attempts to parse that
/// span as JSON.
pub fn parse_first_balanced_object(text: &str) -> std::option::Option<serde_json::Value> {
    let bytes = text.as_bytes();
    let start = text.find('{')?;
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;
    let mut end = std::option::Option::None;

    for (offset, byte) in bytes[start..].iter().enumerate() {
        let c = *byte as char;
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end = std::option::Option::Some(start + offset + 1);
                    break;
                }
            }
            _ => {}
        }
    }

    let end = end?;
    serde_json::from_str(&text[start..end]).ok()
}

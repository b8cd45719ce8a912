//! Deterministic input hashing for incremental generation.
//!
//! Bumping `HASH_VERSION` is the only supported way to invalidate every
//! cached entry on a semantic logic change.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial hashing matching the canonical JSON
//!   + truncated SHA-256 scheme.

/// Bump to invalidate all cached generation results.
pub const HASH_VERSION: &str = "v1.0";

/// A single assumption as considered by the hash: only `id` and `text`
/// participate; `source` is deliberately excluded since it may vary without
/// changing the generated output.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AssumptionForHash {
    pub id: String,
    pub text: String,
}

/// The agent-config subset that influences generated output; any other
/// config field is ignored by the hash.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AgentConfigForHash {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub version: String,
}

#[derive(serde::Serialize)]
struct HashInputs<'a> {
    version: &'a str,
    document_name: &'a str,
    assumptions: std::vec::Vec<AssumptionForHash>,
    dependencies: &'a std::collections::BTreeMap<String, String>,
    project_id: std::option::Option<&'a str>,
    phase: std::option::Option<&'a str>,
    additional_context: &'a str,
    agent_config: AgentConfigForHash,
}

/// Computes the deterministic input hash for a generation attempt: a
/// SHA-256 of the canonical (sorted-key, compact) JSON encoding of every
/// hash input, truncated to 32 hex characters.
pub fn compute_generation_hash(
    document_name: &str,
    assumptions: &[AssumptionForHash],
    dependency_content_hashes: &std::collections::BTreeMap<String, String>,
    project_id: std::option::Option<&str>,
    phase: std::option::Option<&str>,
    additional_context: std::option::Option<&str>,
    agent_config: std::option::Option<AgentConfigForHash>,
) -> String {
    let mut normalized_assumptions: std::vec::Vec<AssumptionForHash> = assumptions.to_vec();
    normalized_assumptions.sort_by(|a, b| a.id.cmp(&b.id));

    let inputs = HashInputs {
        version: HASH_VERSION,
        document_name,
        assumptions: normalized_assumptions,
        dependencies: dependency_content_hashes,
        project_id,
        phase,
        additional_context: additional_context.unwrap_or(""),
        agent_config: agent_config.unwrap_or_default(),
    };

    let canonical = canonical_json(&inputs);
    truncated_sha256(&canonical, 32)
}

/// Computes a content hash for a document's generated content, used as the
/// `dependencies` value for downstream generation hashes. Truncated to 16
/// hex characters.
pub fn compute_content_hash(content: &str) -> String {
    truncated_sha256(content, 16)
}

fn canonical_json<T: serde::Serialize>(value: &T) -> String {
    let json_value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
    serde_json::to_string(&sort_keys(&json_value)).unwrap_or_default()
}

fn sort_keys(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut sorted = serde_json::Map::new();
            let mut keys: std::vec::Vec<&std::string::String> = map.keys().collect();
            keys.sort();
            for key in keys {
                sorted.insert(key.clone(), sort_keys(&map[key]));
            }
            serde_json::Value::Object(sorted)
        }
        serde_json::Value::Array(items) => serde_json::Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

fn truncated_sha256(input: &str, hex_chars: usize) -> String {
    use sha2::Digest;
    let mut hasher = sha2::Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|byte| std::format!("{:02x}", byte)).collect::<std::string::String>()[..hex_chars].to_string()
}

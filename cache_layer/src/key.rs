//! Cache key computation.
//!
//! Keys are `namespace + ":" + sha256(canonical_json(args))[:16]`, matching
//! the hashing scheme the generation hash service uses elsewhere in this
//! workspace, applied here to arbitrary cacheable argument tuples.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial key computation helper.

/// Computes a cache key from a namespace and a JSON-serializable argument
/// tuple. `args` is serialized with sorted object keys before hashing, so
/// callers constructing the same logical key via different field orders
/// still collide correctly.
pub fn compute_key<T: serde::Serialize>(namespace: &str, args: &T) -> std::string::String {
    let value = serde_json::to_value(args).unwrap_or(serde_json::Value::Null);
    let canonical = canonicalize(&value);
    let serialized = serde_json::to_string(&canonical).unwrap_or_default();

    use sha2::Digest;
    let mut hasher = sha2::Sha256::new();
    hasher.update(serialized.as_bytes());
    let digest = hasher.finalize();
    let hex = digest.iter().map(|byte| std::format!("{:02x}", byte)).collect::<std::string::String>();

    std::format!("{namespace}:{}", &hex[..16])
}

/// Recursively sorts object keys so two structurally-equal values with
/// differently ordered maps hash identically.
fn canonicalize(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut sorted = serde_json::Map::new();
            let mut keys: std::vec::Vec<&std::string::String> = map.keys().collect();
            keys.sort();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            serde_json::Value::Object(sorted)
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(canonicalize).collect())
        }
        other => other.clone(),
    }
}

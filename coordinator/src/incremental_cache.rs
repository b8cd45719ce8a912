//! Incremental-Generation Cache: skips regeneration when inputs are
//! unchanged, keyed by a per-document input hash.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial IncrementalCache over cache_layer.

/// Wraps the cache layer with the check/store/invalidate protocol for
/// incremental generation. Stores two keys per `doc_id`: the input hash
/// used to produce the cached result, and the result itself.
pub struct IncrementalCache {
    cache: std::sync::Arc<cache_layer::store::CacheLayer>,
}

impl IncrementalCache {
    pub fn new(cache: std::sync::Arc<cache_layer::store::CacheLayer>) -> Self {
        IncrementalCache { cache }
    }

    fn hash_key(doc_id: &str) -> String {
        std::format!("{}:{}:input_hash", cache_layer::namespace::CacheNamespace::GENERATION_HASH, doc_id)
    }

    fn result_key(doc_id: &str) -> String {
        std::format!("{}:{}:result", cache_layer::namespace::CacheNamespace::GENERATION_HASH, doc_id)
    }

    /// Returns the cached result iff a result is stored and its companion
    /// input hash equals `input_hash`.
    pub fn check(&self, doc_id: &str, input_hash: &str) -> std::option::Option<serde_json::Value> {
        let stored_hash: std::option::Option<std::string::String> = self.cache.get(&Self::hash_key(doc_id));
        match stored_hash {
            std::option::Option::Some(hash) if hash == input_hash => {
                let result = self.cache.get::<serde_json::Value>(&Self::result_key(doc_id));
                if result.is_some() {
                    println!("[IncrementalCache] cache HIT for document {doc_id}");
                } else {
                    println!("[IncrementalCache] hash matched but result missing for {doc_id}, treating as miss");
                }
                result
            }
            std::option::Option::Some(_) => {
                println!("[IncrementalCache] cache MISS - hash changed for document {doc_id}");
                std::option::Option::None
            }
            std::option::Option::None => std::option::Option::None,
        }
    }

    /// Stores `result` under `input_hash` for `doc_id`, both under the
    /// generation-result TTL. Returns true iff both keys were written.
    pub fn store(&self, doc_id: &str, input_hash: &str, result: &serde_json::Value) -> bool {
        let ttl = std::option::Option::Some(cache_layer::namespace::CacheTtl::GENERATION_RESULT);
        let hash_ok = self.cache.set(&Self::hash_key(doc_id), &input_hash, ttl);
        let result_ok = self.cache.set(&Self::result_key(doc_id), result, ttl);
        if hash_ok && result_ok {
            println!("[IncrementalCache] stored result for document {doc_id}");
        }
        hash_ok && result_ok
    }

    /// Deletes both keys for `doc_id`. Call on manual edits or when a
    /// dependency changes.
    pub fn invalidate(&self, doc_id: &str) -> bool {
        let hash_deleted = self.cache.delete(&Self::hash_key(doc_id));
        let result_deleted = self.cache.delete(&Self::result_key(doc_id));
        println!("[IncrementalCache] invalidated cache for document {doc_id}");
        hash_deleted || result_deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cache() -> IncrementalCache {
        IncrementalCache::new(std::sync::Arc::new(cache_layer::store::CacheLayer::new(true)))
    }

    #[test]
    fn test_store_then_check_returns_result_when_hash_matches() {
        let incremental = make_cache();
        let result = serde_json::json!({"content": "hello"});
        incremental.store("doc-1", "hash-a", &result);
        assert_eq!(incremental.check("doc-1", "hash-a"), std::option::Option::Some(result));
    }

    #[test]
    fn test_check_misses_when_hash_differs() {
        let incremental = make_cache();
        incremental.store("doc-1", "hash-a", &serde_json::json!({"content": "hello"}));
        assert_eq!(incremental.check("doc-1", "hash-b"), std::option::Option::None);
    }

    #[test]
    fn test_invalidate_clears_both_keys() {
        let incremental = make_cache();
        incremental.store("doc-1", "hash-a", &serde_json::json!({"content": "hello"}));
        assert!(incremental.invalidate("doc-1"));
        assert_eq!(incremental.check("doc-1", "hash-a"), std::option::Option::None);
    }

    #[test]
    fn test_check_miss_on_empty_cache() {
        let incremental = make_cache();
        assert_eq!(incremental.check("never-stored", "whatever"), std::option::Option::None);
    }
}

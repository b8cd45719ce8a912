//! The namespaced TTL cache and its pub/sub channel.
//!
//! All operations are best-effort: when the cache is disabled, reads report
//! a miss and writes report failure, but no operation ever returns an error
//! to the caller. This mirrors the Redis-backed cache service's graceful
//! degradation: callers must stay correct without the cache, merely slower.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial in-memory CacheLayer with TTL expiry and broadcast pub/sub.

struct Entry {
    value: std::vec::Vec<u8>,
    expires_at: std::option::Option<std::time::Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            std::option::Option::Some(deadline) => std::time::Instant::now() >= deadline,
            std::option::Option::None => false,
        }
    }
}

/// A message delivered to pub/sub subscribers: the channel it was published
/// on and the raw JSON payload.
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub channel: std::string::String,
    pub payload: std::string::String,
}

/// Namespaced, TTL-bounded key/value cache with a pub/sub broadcast channel.
///
/// Construct with `CacheLayer::new(true)` for a live cache or
/// `CacheLayer::new(false)` to exercise graceful-degradation call sites
/// without standing up a backing store.
pub struct CacheLayer {
    enabled: std::sync::atomic::AtomicBool,
    entries: parking_lot::RwLock<std::collections::HashMap<std::string::String, Entry>>,
    broadcaster: tokio::sync::broadcast::Sender<PublishedMessage>,
}

impl CacheLayer {
    /// Creates a cache layer. When `enabled` is false every operation
    /// behaves as if the backing store were unreachable.
    pub fn new(enabled: bool) -> Self {
        let (broadcaster, _receiver) = tokio::sync::broadcast::channel(256);
        CacheLayer {
            enabled: std::sync::atomic::AtomicBool::new(enabled),
            entries: parking_lot::RwLock::new(std::collections::HashMap::new()),
            broadcaster,
        }
    }

    /// Whether the cache is currently serving requests.
    pub fn is_connected(&self) -> bool {
        self.enabled.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Retrieves and deserializes a cached value. Returns `None` on a miss,
    /// an expired entry, a deserialization failure, or when disabled.
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> std::option::Option<T> {
        if !self.is_connected() {
            return std::option::Option::None;
        }
        let guard = self.entries.read();
        let entry = guard.get(key)?;
        if entry.is_expired() {
            return std::option::Option::None;
        }
        serde_json::from_slice(&entry.value).ok()
    }

    /// Serializes and stores `value` under `key` with the given TTL in
    /// seconds (`None` means no expiry). Returns `true` on success.
    pub fn set<T: serde::Serialize>(&self, key: &str, value: &T, ttl_seconds: std::option::Option<u64>) -> bool {
        if !self.is_connected() {
            return false;
        }
        let serialized = match serde_json::to_vec(value) {
            std::result::Result::Ok(bytes) => bytes,
            std::result::Result::Err(error) => {
                println!("[CacheLayer] set error for {key}: {error}");
                return false;
            }
        };
        let expires_at = ttl_seconds.map(|seconds| std::time::Instant::now() + std::time::Duration::from_secs(seconds));
        self.entries.write().insert(key.to_string(), Entry { value: serialized, expires_at });
        true
    }

    /// Removes a key. Returns `true` iff a live (unexpired) entry was
    /// actually removed.
    pub fn delete(&self, key: &str) -> bool {
        if !self.is_connected() {
            return false;
        }
        match self.entries.write().remove(key) {
            std::option::Option::Some(entry) => !entry.is_expired(),
            std::option::Option::None => false,
        }
    }

    /// Deletes every key whose literal prefix matches `prefix_pattern` up to
    /// its first `*`. Returns the number of keys removed.
    pub fn delete_pattern(&self, prefix_pattern: &str) -> usize {
        if !self.is_connected() {
            return 0;
        }
        let prefix = prefix_pattern.split('*').next().unwrap_or(prefix_pattern);
        let mut guard = self.entries.write();
        let matching: std::vec::Vec<std::string::String> = guard
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        for key in matching.iter() {
            guard.remove(key);
        }
        println!("[CacheLayer] delete_pattern({prefix_pattern}) removed {} keys", matching.len());
        matching.len()
    }

    /// Batched `get`: returns one result per input key, preserving order.
    pub fn get_batch<T: serde::de::DeserializeOwned>(&self, keys: &[std::string::String]) -> std::vec::Vec<std::option::Option<T>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Batched `set`: applies the same TTL to every entry; returns the
    /// per-entry success flags in input order.
    pub fn set_batch<T: serde::Serialize>(&self, entries: &[(std::string::String, T)], ttl_seconds: std::option::Option<u64>) -> std::vec::Vec<bool> {
        entries.iter().map(|(key, value)| self.set(key, value, ttl_seconds)).collect()
    }

    /// Publishes a message on `channel`. Subscribers receive it via
    /// `subscribe`; returns `false` (without erroring) if disabled or if
    /// there are currently no subscribers.
    pub fn publish<T: serde::Serialize>(&self, channel: &str, message: &T) -> bool {
        if !self.is_connected() {
            return false;
        }
        let payload = match serde_json::to_string(message) {
            std::result::Result::Ok(text) => text,
            std::result::Result::Err(error) => {
                println!("[CacheLayer] publish serialization error: {error}");
                return false;
            }
        };
        self.broadcaster
            .send(PublishedMessage { channel: channel.to_string(), payload })
            .is_ok()
    }

    /// Subscribes to all published messages; callers filter by `channel`
    /// themselves, matching a single shared Redis-style pub/sub connection
    /// fanning out to many logical channels.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<PublishedMessage> {
        self.broadcaster.subscribe()
    }
}

//! Namespace prefixes and default TTLs for the cache layer.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial namespace/TTL table.

/// Namespace prefixes for organized cache keys.
///
/// Mirrors the fixed set of concerns the cache serves: RAG search/embedding
/// results, document listings, analytics queries, and incremental
/// generation results, plus two pub/sub channel names.
pub struct CacheNamespace;

impl CacheNamespace {
    pub const RAG_SEARCH: &'static str = "dod:cache:rag:search";
    pub const RAG_EMBEDDINGS: &'static str = "dod:cache:rag:embeddings";
    pub const RAG_DOCS_LIST: &'static str = "dod:cache:rag:docs:list";
    pub const ANALYTICS_ADMIN: &'static str = "dod:cache:analytics:admin";
    pub const ANALYTICS_USER: &'static str = "dod:cache:analytics:user";
    pub const GENERATION_HASH: &'static str = "dod:cache:generation:document";
    pub const PUBSUB_CHANNEL: &'static str = "dod:cache:invalidation";
    pub const WS_CHANNEL: &'static str = "dod:ws";
}

/// Default TTLs, in seconds, for each cached concern.
pub struct CacheTtl;

impl CacheTtl {
    pub const RAG_SEARCH: u64 = 30 * 60;
    pub const RAG_EMBEDDINGS: u64 = 24 * 60 * 60;
    pub const RAG_DOCS_LIST: u64 = 60 * 60;
    pub const ANALYTICS_ADMIN: u64 = 5 * 60;
    pub const ANALYTICS_USER: u64 = 15 * 60;
    pub const GENERATION_RESULT: u64 = 7 * 24 * 60 * 60;
}

//! Retriever: a cached, query-shaping adapter over the Vector Store.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial Retriever with RAG-search cache
//!   consultation before falling through to the Vector Store.

const DEFAULT_K: usize = 5;
const GUIDANCE_PREVIEW_CHARS: usize = 280;

/// Project fields consulted when shaping a per-section retrieval query.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProjectInfo {
    pub program_name: String,
    pub description: String,
    pub project_type: String,
    pub current_phase: String,
    pub estimated_value: std::option::Option<f64>,
    pub contract_type: std::option::Option<String>,
    pub period_of_performance: std::option::Option<String>,
}

/// A single retrieval hit surfaced to a caller: the chunk's text and score.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Hit {
    pub content: String,
    pub source: String,
    pub score: f32,
}

#[derive(serde::Serialize)]
struct SearchCacheKeyArgs<'a> {
    query: &'a str,
    project_id: std::option::Option<&'a str>,
    phase: std::option::Option<&'a str>,
    k: usize,
}

/// Provides top-k chunks for a query with a deterministic, cacheable shape.
pub struct Retriever {
    store: std::sync::Arc<evidence_store::vector_store::VectorStore>,
    cache: std::sync::Arc<cache_layer::store::CacheLayer>,
}

impl Retriever {
    pub fn new(store: std::sync::Arc<evidence_store::vector_store::VectorStore>, cache: std::sync::Arc<cache_layer::store::CacheLayer>) -> Self {
        Retriever { store, cache }
    }

    /// Retrieves the top-k hits for `query`, consulting the RAG search cache
    /// first and populating it on miss.
    pub async fn retrieve(
        &self,
        query: &str,
        k: std::option::Option<usize>,
        project_id: std::option::Option<&str>,
        phase: std::option::Option<&str>,
    ) -> std::result::Result<std::vec::Vec<Hit>, evidence_store::error::EvidenceStoreError> {
        let k = k.unwrap_or(DEFAULT_K);
        let cache_key = cache_layer::key::compute_key(
            cache_layer::namespace::CacheNamespace::RAG_SEARCH,
            &SearchCacheKeyArgs { query, project_id, phase, k },
        );

        if let std::option::Option::Some(cached) = self.cache.get::<std::vec::Vec<Hit>>(&cache_key) {
            println!("[Retriever] cache hit for query '{query}'");
            return std::result::Result::Ok(cached);
        }

        let search_hits = self.store.search(query, k, std::option::Option::None, std::option::Option::None).await?;
        let hits: std::vec::Vec<Hit> = search_hits
            .into_iter()
            .map(|hit| Hit { content: hit.chunk.content, source: hit.chunk.metadata.source, score: hit.score })
            .collect();

        self.cache.set(&cache_key, &hits, std::option::Option::Some(cache_layer::namespace::CacheTtl::RAG_SEARCH));
        std::result::Result::Ok(hits)
    }

    /// Retrieves hits and formats them into a single block of context text,
    /// suitable for splicing into a model prompt.
    pub async fn retrieve_with_context(
        &self,
        query: &str,
        k: std::option::Option<usize>,
    ) -> std::result::Result<String, evidence_store::error::EvidenceStoreError> {
        let hits = self.retrieve(query, k, std::option::Option::None, std::option::Option::None).await?;
        std::result::Result::Ok(format_hits(&hits))
    }

    /// Shapes a query from `section_name`, a preview of `guidance`, and
    /// selected project fields, then retrieves and formats context for it.
    pub async fn retrieve_for_section(
        &self,
        section_name: &str,
        guidance: &str,
        project_info: &ProjectInfo,
        k: std::option::Option<usize>,
    ) -> std::result::Result<String, evidence_store::error::EvidenceStoreError> {
        let preview: String = guidance.chars().take(GUIDANCE_PREVIEW_CHARS).collect();
        let query = std::format!(
            "{section_name} for {program} ({project_type}, phase {phase}): {preview}",
            program = project_info.program_name,
            project_type = project_info.project_type,
            phase = project_info.current_phase,
        );
        let hits = self
            .retrieve(&query, k, std::option::Option::Some(&project_info.program_name), std::option::Option::Some(&project_info.current_phase))
            .await?;
        std::result::Result::Ok(format_hits(&hits))
    }
}

fn format_hits(hits: &[Hit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(index, hit)| std::format!("[{}] (source: {}, score: {:.3})\n{}", index + 1, hit.source, hit.score, hit.content))
        .collect::<std::vec::Vec<_>>()
        .join("\n\n")
}

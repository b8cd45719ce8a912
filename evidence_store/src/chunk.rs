//! Defines the Chunk entity held by the Vector Store.
//!
//! A Chunk is the fundamental unit of indexed knowledge: a span of text paired
//! with its embedding and provenance metadata. Chunks are immutable after
//! insertion; the only supported removal is bulk deletion by source.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial Chunk entity for the evidence store.

/// A unit of indexed text with its embedding and provenance metadata.
///
/// # Examples
///
/// ```
/// # use evidence_store::chunk::{Chunk, ChunkMetadata};
/// let chunk = Chunk::new(
///     std::string::String::from("prd-1#0"),
///     std::string::String::from("The system shall support 2,800 concurrent users."),
///     std::vec![0.1, 0.2, 0.3],
///     ChunkMetadata::new(std::string::String::from("prd-1")),
/// );
///
/// std::assert_eq!(chunk.embedding.len(), 3);
/// std::assert_eq!(chunk.metadata.source, "prd-1");
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Chunk {
    /// Unique identifier for this chunk within its source.
    pub chunk_id: String,

    /// The indexed text content.
    pub content: String,

    /// Fixed-dimension embedding vector for similarity search.
    pub embedding: std::vec::Vec<f32>,

    /// Provenance and scoping metadata.
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Creates a new Chunk.
    pub fn new(
        chunk_id: String,
        content: String,
        embedding: std::vec::Vec<f32>,
        metadata: ChunkMetadata,
    ) -> Self {
        Chunk {
            chunk_id,
            content,
            embedding,
            metadata,
        }
    }

    /// Returns the embedding dimensionality.
    pub fn embedding_dim(&self) -> usize {
        self.embedding.len()
    }
}

/// Provenance metadata attached to every chunk.
///
/// Fields beyond the well-known ones (`phase`, `purpose`, `format`,
/// `uploaded_by`) are carried in `extra` so callers can attach arbitrary
/// scoping data without changing this type, matching the open-ended
/// `metadata{...}` shape in the data model.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChunkMetadata {
    /// Identifies the originating document/upload/URL this chunk was extracted from.
    /// Deletion is scoped by this field.
    pub source: String,

    /// Identity of the uploader, when known.
    pub uploaded_by: std::option::Option<String>,

    /// When the source was uploaded.
    pub upload_ts: chrono::DateTime<chrono::Utc>,

    /// Procurement phase this chunk is scoped to, if any.
    pub phase: std::option::Option<String>,

    /// Free-form purpose tag (e.g. "market_research", "regulation").
    pub purpose: std::option::Option<String>,

    /// Content format, e.g. "json" or "structured_requirements" — consulted
    /// by the Hybrid Extractor's pre-structured fast path.
    pub format: std::option::Option<String>,

    /// Additional key/value metadata not covered by the fields above.
    #[serde(default)]
    pub extra: std::collections::BTreeMap<String, String>,
}

impl ChunkMetadata {
    /// Creates metadata with only the required `source` field populated;
    /// `upload_ts` defaults to now.
    pub fn new(source: String) -> Self {
        ChunkMetadata {
            source,
            uploaded_by: std::option::Option::None,
            upload_ts: chrono::Utc::now(),
            phase: std::option::Option::None,
            purpose: std::option::Option::None,
            format: std::option::Option::None,
            extra: std::collections::BTreeMap::new(),
        }
    }

    /// Builder-style setter for `phase`.
    pub fn with_phase(mut self, phase: String) -> Self {
        self.phase = std::option::Option::Some(phase);
        self
    }

    /// Builder-style setter for `purpose`.
    pub fn with_purpose(mut self, purpose: String) -> Self {
        self.purpose = std::option::Option::Some(purpose);
        self
    }

    /// Builder-style setter for `format`.
    pub fn with_format(mut self, format: String) -> Self {
        self.format = std::option::Option::Some(format);
        self
    }

    /// Returns true iff this chunk's metadata satisfies every key/value pair
    /// in `filter` (a conjunction over the well-known fields and `extra`).
    pub fn matches_filter(&self, filter: &std::collections::BTreeMap<String, String>) -> bool {
        for (key, value) in filter.iter() {
            let actual = match key.as_str() {
                "source" => std::option::Option::Some(&self.source),
                "uploaded_by" => self.uploaded_by.as_ref(),
                "phase" => self.phase.as_ref(),
                "purpose" => self.purpose.as_ref(),
                "format" => self.format.as_ref(),
                other => self.extra.get(other),
            };
            match actual {
                std::option::Option::Some(actual_value) if actual_value == value => {}
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_new_has_expected_dim() {
        let chunk = Chunk::new(
            String::from("src#0"),
            String::from("content"),
            vec![0.0; 384],
            ChunkMetadata::new(String::from("src")),
        );
        assert_eq!(chunk.embedding_dim(), 384);
    }

    #[test]
    fn test_metadata_filter_conjunction() {
        let metadata = ChunkMetadata::new(String::from("prd-1"))
            .with_phase(String::from("pre_solicitation"))
            .with_purpose(String::from("market_research"));

        let mut filter = std::collections::BTreeMap::new();
        filter.insert(String::from("phase"), String::from("pre_solicitation"));
        assert!(metadata.matches_filter(&filter));

        filter.insert(String::from("purpose"), String::from("cost_estimate"));
        assert!(!metadata.matches_filter(&filter));
    }

    #[test]
    fn test_metadata_filter_on_extra_field() {
        let mut metadata = ChunkMetadata::new(String::from("prd-1"));
        metadata.extra.insert(String::from("original_filename"), String::from("prd.pdf"));

        let mut filter = std::collections::BTreeMap::new();
        filter.insert(String::from("original_filename"), String::from("prd.pdf"));
        assert!(metadata.matches_filter(&filter));

        filter.insert(String::from("original_filename"), String::from("other.pdf"));
        assert!(!metadata.matches_filter(&filter));
    }

    #[test]
    fn test_metadata_filter_missing_key_fails() {
        let metadata = ChunkMetadata::new(String::from("prd-1"));
        let mut filter = std::collections::BTreeMap::new();
        filter.insert(String::from("purpose"), String::from("market_research"));
        assert!(!metadata.matches_filter(&filter));
    }
}

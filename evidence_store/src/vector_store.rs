//! In-process similarity search over a growable set of chunks.
//!
//! The store holds every chunk and its embedding in memory and performs exact
//! cosine similarity search; no approximate index is used, which keeps the
//! implementation simple at the cost of O(n) search. That tradeoff is
//! documented as acceptable up to roughly 10^6 chunks.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial in-memory VectorStore with atomic persistence.

/// Result of a `delete_by_source` call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DeleteResult {
    pub deleted: usize,
    pub remaining: usize,
    pub success: bool,
}

/// A similarity search hit: the chunk and its cosine similarity score.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub chunk: crate::chunk::Chunk,
    pub score: f32,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct PersistedStore {
    dim: usize,
    chunks: std::vec::Vec<crate::chunk::Chunk>,
}

/// In-memory vector store: owns chunks, delegates embedding to an injected
/// `Embedder`.
///
/// Insertion order is preserved and used to break ties in `search`. Chunks
/// are addressed for replacement/deletion by `(metadata.source, chunk_id)`.
pub struct VectorStore {
    embedder: std::sync::Arc<dyn crate::embedder::Embedder>,
    dim: std::sync::atomic::AtomicUsize,
    chunks: parking_lot::RwLock<std::vec::Vec<crate::chunk::Chunk>>,
}

impl VectorStore {
    /// Creates an empty store backed by the given embedder. The store's
    /// dimension is pinned on the first successful insert.
    pub fn new(embedder: std::sync::Arc<dyn crate::embedder::Embedder>) -> Self {
        VectorStore {
            embedder,
            dim: std::sync::atomic::AtomicUsize::new(0),
            chunks: parking_lot::RwLock::new(std::vec::Vec::new()),
        }
    }

    /// Number of chunks currently held.
    pub fn len(&self) -> usize {
        self.chunks.read().len()
    }

    /// True iff the store holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts chunks, validating their embedding dimension against the
    /// store's pinned dimension (set from the first chunk if the store is
    /// empty). Chunks sharing `(source, chunk_id)` with an existing chunk
    /// replace it in place; new chunks are appended. The whole call is
    /// atomic: on a dimension mismatch nothing is inserted.
    pub fn insert(
        &self,
        new_chunks: std::vec::Vec<crate::chunk::Chunk>,
    ) -> std::result::Result<usize, crate::error::EvidenceStoreError> {
        if new_chunks.is_empty() {
            return std::result::Result::Ok(0);
        }

        let mut expected = self.dim.load(std::sync::atomic::Ordering::SeqCst);
        if expected == 0 {
            expected = new_chunks[0].embedding_dim();
        }
        for chunk in new_chunks.iter() {
            if chunk.embedding_dim() != expected {
                return std::result::Result::Err(crate::error::EvidenceStoreError::DimensionMismatch {
                    expected,
                    actual: chunk.embedding_dim(),
                });
            }
        }

        let mut guard = self.chunks.write();
        let mut inserted = 0usize;
        for chunk in new_chunks.into_iter() {
            let existing = guard.iter_mut().find(|candidate| {
                candidate.metadata.source == chunk.metadata.source && candidate.chunk_id == chunk.chunk_id
            });
            match existing {
                std::option::Option::Some(slot) => {
                    *slot = chunk;
                }
                std::option::Option::None => {
                    guard.push(chunk);
                    inserted += 1;
                }
            }
        }
        self.dim.store(expected, std::sync::atomic::Ordering::SeqCst);
        println!("[VectorStore] inserted {} new chunks (store now holds {})", inserted, guard.len());
        std::result::Result::Ok(inserted)
    }

    /// Embeds `query_text` and returns the top-`k` chunks by cosine
    /// similarity, optionally filtered by a score threshold and/or a
    /// metadata conjunction. Ties are broken by insertion order.
    pub async fn search(
        &self,
        query_text: &str,
        k: usize,
        score_threshold: std::option::Option<f32>,
        metadata_filter: std::option::Option<&std::collections::BTreeMap<String, String>>,
    ) -> std::result::Result<std::vec::Vec<SearchHit>, crate::error::EvidenceStoreError> {
        let query_embedding = self
            .embedder
            .embed(query_text)
            .await
            .map_err(crate::error::EvidenceStoreError::EmbedderFailed)?;

        let guard = self.chunks.read();
        let mut scored: std::vec::Vec<(usize, f32)> = std::vec::Vec::new();
        for (index, chunk) in guard.iter().enumerate() {
            if let std::option::Option::Some(filter) = metadata_filter {
                if !chunk.metadata.matches_filter(filter) {
                    continue;
                }
            }
            let score = cosine_similarity(&query_embedding, &chunk.embedding);
            if let std::option::Option::Some(threshold) = score_threshold {
                if score < threshold {
                    continue;
                }
            }
            scored.push((index, score));
        }

        scored.sort_by(|a, b| match b.1.partial_cmp(&a.1) {
            std::option::Option::Some(ordering) => {
                if ordering == std::cmp::Ordering::Equal {
                    a.0.cmp(&b.0)
                } else {
                    ordering
                }
            }
            std::option::Option::None => a.0.cmp(&b.0),
        });

        let hits = scored
            .into_iter()
            .take(k)
            .map(|(index, score)| SearchHit {
                chunk: guard[index].clone(),
                score,
            })
            .collect();
        std::result::Result::Ok(hits)
    }

    /// Removes every chunk whose `metadata.source` equals `source`.
    /// `success` is false iff zero chunks matched.
    pub fn delete_by_source(&self, source: &str) -> DeleteResult {
        let mut guard = self.chunks.write();
        let before = guard.len();
        guard.retain(|chunk| chunk.metadata.source != source);
        let deleted = before - guard.len();
        println!("[VectorStore] delete_by_source({source}) removed {deleted} chunks");
        DeleteResult {
            deleted,
            remaining: guard.len(),
            success: deleted > 0,
        }
    }

    /// Persists the store to `path` atomically: content is written to a
    /// sibling temp file which is then renamed into place, so a crash
    /// mid-write never corrupts the previous snapshot.
    pub fn save(&self, path: &std::path::Path) -> std::result::Result<(), crate::error::EvidenceStoreError> {
        let guard = self.chunks.read();
        let persisted = PersistedStore {
            dim: self.dim.load(std::sync::atomic::Ordering::SeqCst),
            chunks: guard.clone(),
        };
        let serialized = serde_json::to_vec(&persisted)?;

        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, &serialized)?;
        std::fs::rename(&temp_path, path)?;
        println!("[VectorStore] saved {} chunks to {}", persisted.chunks.len(), path.display());
        std::result::Result::Ok(())
    }

    /// Loads a previously saved store from `path`. A missing file is treated
    /// as an empty store, not an error.
    pub fn load(
        embedder: std::sync::Arc<dyn crate::embedder::Embedder>,
        path: &std::path::Path,
    ) -> std::result::Result<VectorStore, crate::error::EvidenceStoreError> {
        if !path.exists() {
            return std::result::Result::Ok(VectorStore::new(embedder));
        }
        let bytes = std::fs::read(path)?;
        let persisted: PersistedStore = serde_json::from_slice(&bytes)?;
        std::result::Result::Ok(VectorStore {
            embedder,
            dim: std::sync::atomic::AtomicUsize::new(persisted.dim),
            chunks: parking_lot::RwLock::new(persisted.chunks),
        })
    }
}

/// Exact cosine similarity between two equal-length vectors. Returns 0.0 if
/// either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

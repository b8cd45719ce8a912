//! Error types for the evidence store.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial error enum for vector store operations.

/// Errors raised by `VectorStore` operations.
#[derive(Debug, thiserror::Error)]
pub enum EvidenceStoreError {
    #[error("embedding dimension mismatch: store expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedder failed: {0}")]
    EmbedderFailed(String),

    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

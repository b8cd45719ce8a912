//! Error types for the metadata store.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial error enum.

#[derive(Debug, thiserror::Error)]
pub enum MetadataStoreError {
    #[error("adding reference {from_id} -> {to_id} would create a cycle")]
    CycleDetected { from_id: String, to_id: String },

    #[error("document not found: {0}")]
    NotFound(String),
}

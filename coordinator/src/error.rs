//! Error taxonomy for the Agent Coordinator.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial CoordinatorError enum.

#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("missing dependencies for {doc_type}: {missing:?}")]
    MissingDependency { doc_type: String, missing: std::vec::Vec<String> },

    #[error("agent failure for {doc_type}: {message}")]
    AgentFailure { doc_type: String, message: String },

    #[error("dependency graph has a cycle among: {0:?}")]
    DependencyCycle(std::vec::Vec<String>),

    #[error("unknown doc_type requested: {0}")]
    UnknownDocType(String),

    #[error("task is ineligible: ancestor(s) not approved, uploaded, or generated: {0:?}")]
    IneligibleAncestors(std::vec::Vec<String>),
}

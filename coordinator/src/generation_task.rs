//! GenerationTask and progress-event types.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial task and progress event types.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    PartialFailure,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Started,
    Progress,
    Completed,
    Error,
    CacheHit,
}

/// A single progress notification, fanned out over the cache's pub/sub
/// channel by the serving process.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProgressEvent {
    pub task_id: String,
    pub project_id: String,
    pub progress: u8,
    pub message: String,
    pub event_type: EventType,
    pub extra: serde_json::Value,
}

/// Coordinator-managed unit producing one or more artifacts.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GenerationTask {
    pub task_id: String,
    pub document_names: std::vec::Vec<String>,
    pub assumptions: std::vec::Vec<crate::agent::Assumption>,
    /// Each resolved doc_type's direct dependency doc_types, derived from the
    /// registry when dependency order is resolved. Empty until `run` starts.
    pub dependencies: std::collections::BTreeMap<String, std::vec::Vec<String>>,
    pub progress: u8,
    pub status: TaskStatus,
    pub errors: std::vec::Vec<String>,
    pub sections: std::collections::BTreeMap<String, String>,
    /// Per-document quality scoring, keyed by document_name, as reported by
    /// agents that populate `AgentOutput::metadata["quality_analysis"]`.
    pub quality_analysis: serde_json::Value,
    /// Free-form agent-reported metadata (token usage, model name, timing),
    /// merged in as each artifact completes.
    pub agent_metadata: serde_json::Value,
}

impl GenerationTask {
    pub fn new(task_id: String, document_names: std::vec::Vec<String>, assumptions: std::vec::Vec<crate::agent::Assumption>) -> Self {
        GenerationTask {
            task_id,
            document_names,
            assumptions,
            dependencies: std::collections::BTreeMap::new(),
            progress: 0,
            status: TaskStatus::Pending,
            errors: std::vec::Vec::new(),
            sections: std::collections::BTreeMap::new(),
            quality_analysis: serde_json::json!({}),
            agent_metadata: serde_json::json!({}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_starts_pending_with_zero_progress() {
        let task = GenerationTask::new("t1".to_string(), vec!["igce".to_string()], vec![]);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.progress, 0);
    }
}

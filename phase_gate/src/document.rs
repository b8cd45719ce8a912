//! Project documents as seen by the phase gate: the full per-document
//! checklist record, covering both human approval state (`status`) and AI
//! generation state (`generation_status`), independent of the Metadata
//! Store's content-addressed artifact record.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial ProjectDocument and DocumentStatus.
//! - 2026-01-12T00:00:00Z @AI: Expand to the full checklist record and split
//!   approval status from generation status.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Uploaded,
    Approved,
    Rejected,
}

/// Where an artifact stands in the Agent Coordinator's generation pipeline,
/// independent of human approval (`DocumentStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    NotStarted,
    Generating,
    Generated,
    Failed,
}

/// A document attached to a project for phase-gate purposes: the checklist
/// entry covering approval routing, generation state, and (once generated)
/// the content itself.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProjectDocument {
    pub id: String,
    pub project_id: String,
    pub document_name: String,
    pub status: DocumentStatus,
    pub is_required: bool,
    pub requires_approval: bool,
    pub phase: crate::phase::PhaseName,
    pub generation_status: GenerationStatus,
    pub generation_task_id: std::option::Option<String>,
    pub generated_content: std::option::Option<String>,
    pub generated_at: std::option::Option<chrono::DateTime<chrono::Utc>>,
    pub ai_quality_score: std::option::Option<f64>,
    pub approval_routing: std::vec::Vec<String>,
    pub display_order: u32,
    pub deadline: std::option::Option<chrono::NaiveDate>,
}

impl ProjectDocument {
    /// Builds a checklist entry with the common defaults: required,
    /// requiring approval, scoped to `PreSolicitation` until `Project::with_document`
    /// stamps it to the project's actual phase, not yet generated.
    pub fn new(id: impl Into<String>, document_name: impl Into<String>, status: DocumentStatus) -> Self {
        ProjectDocument {
            id: id.into(),
            project_id: std::string::String::new(),
            document_name: document_name.into(),
            status,
            is_required: true,
            requires_approval: true,
            phase: crate::phase::PhaseName::PreSolicitation,
            generation_status: GenerationStatus::NotStarted,
            generation_task_id: std::option::Option::None,
            generated_content: std::option::Option::None,
            generated_at: std::option::Option::None,
            ai_quality_score: std::option::Option::None,
            approval_routing: std::vec::Vec::new(),
            display_order: 0,
            deadline: std::option::Option::None,
        }
    }

    pub fn with_phase(mut self, phase: crate::phase::PhaseName) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_display_order(mut self, display_order: u32) -> Self {
        self.display_order = display_order;
        self
    }

    /// Records a successful Agent Coordinator run against this document: the
    /// generated content, generation timestamp, `generation_status=Generated`,
    /// and an optional quality score. A `Pending` document is considered
    /// satisfied and moves to `Uploaded`; an already `Approved` or `Rejected`
    /// document keeps its human-set status.
    pub fn record_generated(&mut self, content: String, generation_task_id: std::option::Option<String>, ai_quality_score: std::option::Option<f64>, generated_at: chrono::DateTime<chrono::Utc>) {
        self.generated_content = std::option::Option::Some(content);
        self.generated_at = std::option::Option::Some(generated_at);
        self.generation_status = GenerationStatus::Generated;
        self.generation_task_id = generation_task_id;
        if ai_quality_score.is_some() {
            self.ai_quality_score = ai_quality_score;
        }
        if self.status == DocumentStatus::Pending {
            self.status = DocumentStatus::Uploaded;
        }
    }

    /// Records a failed Agent Coordinator run: `generation_status=Failed`,
    /// leaving any previously generated content untouched.
    pub fn record_generation_failed(&mut self, generation_task_id: std::option::Option<String>) {
        self.generation_status = GenerationStatus::Failed;
        self.generation_task_id = generation_task_id;
    }

    /// Whether this document already carries content that can stand in for
    /// an ancestor: approved, uploaded, or AI-generated.
    pub fn has_usable_content(&self) -> bool {
        matches!(self.status, DocumentStatus::Approved | DocumentStatus::Uploaded) || self.generated_content.is_some()
    }
}

/// Whether `document_name` matches `required_name` by case-insensitive
/// substring, mirroring the source system's `ILIKE '%name%'` lookup.
pub fn matches_required_name(document_name: &str, required_name: &str) -> bool {
    document_name.to_lowercase().contains(&required_name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_required_name_is_case_insensitive_substring() {
        assert!(matches_required_name("Market Research Report v2", "market research report"));
        assert!(matches_required_name("MARKET RESEARCH REPORT", "market research"));
        assert!(!matches_required_name("Acquisition Plan", "market research report"));
    }

    #[test]
    fn test_record_generated_moves_pending_document_to_uploaded() {
        let mut document = ProjectDocument::new("d1", "Acquisition Plan", DocumentStatus::Pending);
        document.record_generated("content".to_string(), std::option::Option::Some("task-1".to_string()), std::option::Option::Some(92.0), chrono::Utc::now());
        assert_eq!(document.status, DocumentStatus::Uploaded);
        assert_eq!(document.generation_status, GenerationStatus::Generated);
        assert!(document.has_usable_content());
    }

    #[test]
    fn test_record_generated_leaves_approved_status_unchanged() {
        let mut document = ProjectDocument::new("d1", "Acquisition Plan", DocumentStatus::Approved);
        document.record_generated("content".to_string(), std::option::Option::None, std::option::Option::None, chrono::Utc::now());
        assert_eq!(document.status, DocumentStatus::Approved);
    }

    #[test]
    fn test_has_usable_content_false_for_pending_without_generated_content() {
        let document = ProjectDocument::new("d1", "Acquisition Plan", DocumentStatus::Pending);
        assert!(!document.has_usable_content());
    }
}

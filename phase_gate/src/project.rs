//! The procurement project as tracked by the phase gate: current phase,
//! per-phase status/dates, and the document checklist.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial Project and PhaseState.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PhaseState {
    pub status: PhaseStatus,
    pub start_date: std::option::Option<chrono::NaiveDate>,
    pub end_date: std::option::Option<chrono::NaiveDate>,
}

impl PhaseState {
    fn pending() -> Self {
        PhaseState { status: PhaseStatus::Pending, start_date: std::option::Option::None, end_date: std::option::Option::None }
    }
}

/// A procurement project, read-mostly from the phase gate's perspective:
/// only `current_phase` and the per-phase `PhaseState` are mutated here, and
/// only as a result of an approved transition.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Project {
    pub id: String,
    pub program_name: String,
    pub current_phase: crate::phase::PhaseName,
    pub documents: std::vec::Vec<crate::document::ProjectDocument>,
    pub phases: std::collections::BTreeMap<crate::phase::PhaseName, PhaseState>,
}

impl Project {
    /// Creates a new project at `pre_solicitation`, with that phase already
    /// `in_progress` and every later phase `pending`.
    pub fn new(id: impl Into<String>, program_name: impl Into<String>) -> Self {
        let mut phases = std::collections::BTreeMap::new();
        for phase in crate::phase::PhaseName::order() {
            phases.insert(*phase, PhaseState::pending());
        }
        if let std::option::Option::Some(state) = phases.get_mut(&crate::phase::PhaseName::PreSolicitation) {
            state.status = PhaseStatus::InProgress;
        }
        Project { id: id.into(), program_name: program_name.into(), current_phase: crate::phase::PhaseName::PreSolicitation, documents: std::vec::Vec::new(), phases }
    }

    pub fn with_document(mut self, mut document: crate::document::ProjectDocument) -> Self {
        document.project_id = self.id.clone();
        self.documents.push(document);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::PhaseName;

    #[test]
    fn test_new_project_starts_pre_solicitation_in_progress() {
        let project = Project::new("p1", "Program Alpha");
        assert_eq!(project.current_phase, PhaseName::PreSolicitation);
        assert_eq!(project.phases[&PhaseName::PreSolicitation].status, PhaseStatus::InProgress);
        assert_eq!(project.phases[&PhaseName::Solicitation].status, PhaseStatus::Pending);
    }
}

//! Phase transition validation: the read-only check a caller runs before
//! requesting a transition.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial validate_transition implementing the
//!   valid-chain check, document-approval gating, and gatekeeper/role checks.

const VALID_TRANSITIONS: &[(crate::phase::PhaseName, crate::phase::PhaseName)] = &[
    (crate::phase::PhaseName::PreSolicitation, crate::phase::PhaseName::Solicitation),
    (crate::phase::PhaseName::Solicitation, crate::phase::PhaseName::PostSolicitation),
    (crate::phase::PhaseName::PostSolicitation, crate::phase::PhaseName::Award),
];

/// Per-document approval status as seen by the validator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DocumentStatusInfo {
    pub exists: bool,
    pub status: std::option::Option<crate::document::DocumentStatus>,
    pub approved: bool,
    pub document_id: std::option::Option<String>,
}

/// The result of `validate_transition`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TransitionValidation {
    pub can_transition: bool,
    pub blocking_issues: std::vec::Vec<String>,
    pub warnings: std::vec::Vec<String>,
    pub document_status: std::collections::BTreeMap<String, DocumentStatusInfo>,
    pub required_gatekeeper: std::option::Option<String>,
    pub user_can_request: bool,
}

/// Checks required-document approval status for `from_phase` against
/// `project.documents`, matching each required document by case-insensitive
/// substring (the first match wins, mirroring a single-row `ILIKE` lookup).
pub fn check_document_approvals(project: &crate::project::Project, from_phase: crate::phase::PhaseName, config: &crate::config::GateConfig) -> std::collections::BTreeMap<String, DocumentStatusInfo> {
    let mut results = std::collections::BTreeMap::new();
    for required_name in config.required_documents(from_phase) {
        let found = project.documents.iter().find(|doc| crate::document::matches_required_name(&doc.document_name, required_name));
        let info = match found {
            std::option::Option::Some(document) => DocumentStatusInfo {
                exists: true,
                status: std::option::Option::Some(document.status),
                approved: document.status == crate::document::DocumentStatus::Approved,
                document_id: std::option::Option::Some(document.id.clone()),
            },
            std::option::Option::None => DocumentStatusInfo { exists: false, status: std::option::Option::None, approved: false, document_id: std::option::Option::None },
        };
        results.insert(required_name.clone(), info);
    }
    results
}

/// Validates whether `project` may transition from `from_phase` to
/// `to_phase` on behalf of `requester_role`.
///
/// An invalid transition in the lifecycle chain short-circuits with a single
/// blocking issue; document and role checks are otherwise independent and
/// all surface together.
pub fn validate_transition(
    project: &crate::project::Project,
    from_phase: crate::phase::PhaseName,
    to_phase: crate::phase::PhaseName,
    requester_role: crate::user::UserRole,
    config: &crate::config::GateConfig,
) -> TransitionValidation {
    if !VALID_TRANSITIONS.contains(&(from_phase, to_phase)) {
        return TransitionValidation {
            can_transition: false,
            blocking_issues: vec![std::format!("Invalid phase transition: {from_phase} -> {to_phase}")],
            warnings: std::vec::Vec::new(),
            document_status: std::collections::BTreeMap::new(),
            required_gatekeeper: std::option::Option::None,
            user_can_request: requester_role.can_request_transition(),
        };
    }

    let document_status = check_document_approvals(project, from_phase, config);
    let mut blocking_issues = std::vec::Vec::new();
    let mut warnings = std::vec::Vec::new();

    for (doc_name, status) in document_status.iter() {
        if !status.exists {
            blocking_issues.push(std::format!("Required document missing: {doc_name}"));
        } else if !status.approved {
            let message = std::format!("Document not yet approved: {doc_name} (status: {:?})", status.status);
            if config.blocking_on_unapproved {
                blocking_issues.push(message);
            } else {
                warnings.push(message);
            }
        }
    }

    let gatekeeper = config.gatekeeper(from_phase, to_phase).map(|g| g.to_string());
    let user_can_request = requester_role.can_request_transition();
    if !user_can_request {
        warnings.push("Only Contracting Officers, Program Managers, or Admins can request phase transitions".to_string());
    }

    TransitionValidation {
        can_transition: blocking_issues.is_empty(),
        blocking_issues,
        warnings,
        document_status,
        required_gatekeeper: gatekeeper,
        user_can_request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentStatus, ProjectDocument};
    use crate::phase::PhaseName;
    use crate::project::Project;
    use crate::user::UserRole;

    fn fully_approved_project() -> Project {
        Project::new("p1", "Program Alpha")
            .with_document(ProjectDocument::new("d1", "Market Research Report", DocumentStatus::Approved))
            .with_document(ProjectDocument::new("d2", "Acquisition Plan", DocumentStatus::Approved))
            .with_document(ProjectDocument::new("d3", "Independent Government Cost Estimate", DocumentStatus::Approved))
    }

    #[test]
    fn test_invalid_transition_order_is_rejected() {
        let project = Project::new("p1", "Program Alpha");
        let config = crate::config::GateConfig::default();
        let result = validate_transition(&project, PhaseName::PreSolicitation, PhaseName::PostSolicitation, UserRole::ContractingOfficer, &config);
        assert!(!result.can_transition);
        assert!(result.blocking_issues[0].contains("Invalid phase transition"));
    }

    #[test]
    fn test_fully_approved_documents_allow_transition() {
        let project = fully_approved_project();
        let config = crate::config::GateConfig::default();
        let result = validate_transition(&project, PhaseName::PreSolicitation, PhaseName::Solicitation, UserRole::ContractingOfficer, &config);
        assert!(result.can_transition);
        assert!(result.blocking_issues.is_empty());
        assert_eq!(result.required_gatekeeper.as_deref(), std::option::Option::Some("Contracting Officer"));
    }

    #[test]
    fn test_missing_document_blocks_transition() {
        let project = Project::new("p1", "Program Alpha")
            .with_document(ProjectDocument::new("d1", "Market Research Report", DocumentStatus::Approved))
            .with_document(ProjectDocument::new("d2", "Acquisition Plan", DocumentStatus::Pending));
        let config = crate::config::GateConfig::default();
        let result = validate_transition(&project, PhaseName::PreSolicitation, PhaseName::Solicitation, UserRole::ContractingOfficer, &config);
        assert!(!result.can_transition);
        assert!(result.blocking_issues.iter().any(|issue| issue.contains("Independent Government Cost Estimate")));
    }

    #[test]
    fn test_unapproved_existing_document_is_warning_not_blocking_by_default() {
        let project = Project::new("p1", "Program Alpha")
            .with_document(ProjectDocument::new("d1", "Market Research Report", DocumentStatus::Approved))
            .with_document(ProjectDocument::new("d2", "Acquisition Plan", DocumentStatus::Uploaded))
            .with_document(ProjectDocument::new("d3", "Independent Government Cost Estimate", DocumentStatus::Approved));
        let config = crate::config::GateConfig::default();
        let result = validate_transition(&project, PhaseName::PreSolicitation, PhaseName::Solicitation, UserRole::ContractingOfficer, &config);
        assert!(result.can_transition);
        assert!(result.warnings.iter().any(|w| w.contains("Acquisition Plan")));
    }

    #[test]
    fn test_blocking_on_unapproved_policy_turns_warning_into_blocker() {
        let project = Project::new("p1", "Program Alpha")
            .with_document(ProjectDocument::new("d1", "Market Research Report", DocumentStatus::Approved))
            .with_document(ProjectDocument::new("d2", "Acquisition Plan", DocumentStatus::Uploaded))
            .with_document(ProjectDocument::new("d3", "Independent Government Cost Estimate", DocumentStatus::Approved));
        let mut config = crate::config::GateConfig::default();
        config.blocking_on_unapproved = true;
        let result = validate_transition(&project, PhaseName::PreSolicitation, PhaseName::Solicitation, UserRole::ContractingOfficer, &config);
        assert!(!result.can_transition);
    }

    #[test]
    fn test_viewer_role_cannot_request_but_does_not_block_others() {
        let project = fully_approved_project();
        let config = crate::config::GateConfig::default();
        let result = validate_transition(&project, PhaseName::PreSolicitation, PhaseName::Solicitation, UserRole::Viewer, &config);
        assert!(result.can_transition);
        assert!(!result.user_can_request);
        assert!(result.warnings.iter().any(|w| w.contains("Only Contracting Officers")));
    }
}

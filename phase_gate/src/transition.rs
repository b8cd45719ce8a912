//! Phase transition requests and the service that creates and resolves them.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial PhaseTransitionRequest and GateService.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStatus {
    Pending,
    Approved,
    Rejected,
}

/// A request to move a project from one phase to the next. Immutable once
/// `status` leaves `Pending`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PhaseTransitionRequest {
    pub id: String,
    pub project_id: String,
    pub from_phase: crate::phase::PhaseName,
    pub to_phase: crate::phase::PhaseName,
    pub requested_by: String,
    pub gatekeeper_id: std::option::Option<String>,
    pub status: TransitionStatus,
    pub validation_results: crate::gate::TransitionValidation,
    pub gatekeeper_comments: std::option::Option<String>,
    pub resolved_at: std::option::Option<chrono::DateTime<chrono::Utc>>,
}

/// Whether `gatekeeper` may resolve a request whose validation computed
/// `required`. A request with no configured gatekeeper (an invalid or
/// gatekeeper-less transition pair) has nothing to check against and is left
/// to the validation that already blocked or allowed the request.
fn authorized(required: &std::option::Option<String>, gatekeeper: crate::user::UserRole) -> bool {
    match required {
        std::option::Option::Some(name) => gatekeeper.matches_gatekeeper(name),
        std::option::Option::None => true,
    }
}

/// Owns the procurement projects and their transition requests, and
/// enforces that `current_phase` only ever advances through an approved
/// request.
pub struct GateService {
    config: crate::config::GateConfig,
    projects: parking_lot::RwLock<std::collections::HashMap<String, crate::project::Project>>,
    requests: parking_lot::RwLock<std::collections::HashMap<String, PhaseTransitionRequest>>,
    counter: std::sync::atomic::AtomicU64,
}

impl GateService {
    pub fn new(config: crate::config::GateConfig) -> Self {
        GateService {
            config,
            projects: parking_lot::RwLock::new(std::collections::HashMap::new()),
            requests: parking_lot::RwLock::new(std::collections::HashMap::new()),
            counter: std::sync::atomic::AtomicU64::new(0),
        }
    }

    pub fn add_project(&self, project: crate::project::Project) {
        self.projects.write().insert(project.id.clone(), project);
    }

    pub fn get_project(&self, project_id: &str) -> std::option::Option<crate::project::Project> {
        self.projects.read().get(project_id).cloned()
    }

    pub fn get_request(&self, request_id: &str) -> std::option::Option<PhaseTransitionRequest> {
        self.requests.read().get(request_id).cloned()
    }

    /// Every request recorded for `project_id`, in no particular order.
    pub fn list_requests_for_project(&self, project_id: &str) -> std::vec::Vec<PhaseTransitionRequest> {
        self.requests.read().values().filter(|request| request.project_id == project_id).cloned().collect()
    }

    /// Inserts a previously-created request as-is, used when restoring state
    /// a caller persisted between process runs. Does not re-validate it.
    pub fn restore_request(&self, request: PhaseTransitionRequest) {
        self.requests.write().insert(request.id.clone(), request);
    }

    /// Raises the request-id counter floor so ids generated after a restore
    /// never collide with previously-persisted requests.
    pub fn raise_counter_floor(&self, floor: u64) {
        self.counter.fetch_max(floor, std::sync::atomic::Ordering::SeqCst);
    }

    /// Looks up a project's document by exact, case-insensitive name. Used
    /// by the Agent Coordinator to check ancestor eligibility and to persist
    /// generation results, independent of `check_document_approvals`'s
    /// substring matching against the required-document table.
    pub fn document_state(&self, project_id: &str, document_name: &str) -> std::option::Option<crate::document::ProjectDocument> {
        self.projects.read().get(project_id)?.documents.iter().find(|d| d.document_name.eq_ignore_ascii_case(document_name)).cloned()
    }

    /// Records a successful Agent Coordinator generation against the named
    /// document. Returns `false` without effect if the project or document
    /// is not tracked by the phase gate.
    pub fn record_document_generated(&self, project_id: &str, document_name: &str, content: String, generation_task_id: std::option::Option<String>, ai_quality_score: std::option::Option<f64>) -> bool {
        let mut projects = self.projects.write();
        match projects.get_mut(project_id).and_then(|project| project.documents.iter_mut().find(|d| d.document_name.eq_ignore_ascii_case(document_name))) {
            std::option::Option::Some(document) => {
                document.record_generated(content, generation_task_id, ai_quality_score, chrono::Utc::now());
                true
            }
            std::option::Option::None => false,
        }
    }

    /// Records a failed Agent Coordinator generation against the named
    /// document. Returns `false` without effect if the project or document
    /// is not tracked by the phase gate.
    pub fn record_document_generation_failed(&self, project_id: &str, document_name: &str, generation_task_id: std::option::Option<String>) -> bool {
        let mut projects = self.projects.write();
        match projects.get_mut(project_id).and_then(|project| project.documents.iter_mut().find(|d| d.document_name.eq_ignore_ascii_case(document_name))) {
            std::option::Option::Some(document) => {
                document.record_generation_failed(generation_task_id);
                true
            }
            std::option::Option::None => false,
        }
    }

    /// Validates a transition for `project_id` without recording anything.
    pub fn validate(&self, project_id: &str, to_phase: crate::phase::PhaseName, requester_role: crate::user::UserRole) -> std::result::Result<crate::gate::TransitionValidation, crate::error::PhaseGateError> {
        let guard = self.projects.read();
        let project = guard.get(project_id).ok_or_else(|| crate::error::PhaseGateError::ProjectNotFound(project_id.to_string()))?;
        std::result::Result::Ok(crate::gate::validate_transition(project, project.current_phase, to_phase, requester_role, &self.config))
    }

    /// Records a transition request after validating it. Fails with
    /// `TransitionBlocked` rather than creating a request if blocking issues
    /// are present; warnings do not prevent request creation.
    pub fn create_transition_request(
        &self,
        project_id: &str,
        to_phase: crate::phase::PhaseName,
        requested_by: &str,
        requester_role: crate::user::UserRole,
        gatekeeper_id: std::option::Option<String>,
    ) -> std::result::Result<PhaseTransitionRequest, crate::error::PhaseGateError> {
        let from_phase = {
            let guard = self.projects.read();
            let project = guard.get(project_id).ok_or_else(|| crate::error::PhaseGateError::ProjectNotFound(project_id.to_string()))?;
            project.current_phase
        };

        let validation = self.validate(project_id, to_phase, requester_role)?;
        if !validation.can_transition {
            return std::result::Result::Err(crate::error::PhaseGateError::TransitionBlocked(validation.blocking_issues));
        }

        let sequence = self.counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let request = PhaseTransitionRequest {
            id: std::format!("transition-{project_id}-{sequence}"),
            project_id: project_id.to_string(),
            from_phase,
            to_phase,
            requested_by: requested_by.to_string(),
            gatekeeper_id,
            status: TransitionStatus::Pending,
            validation_results: validation,
            gatekeeper_comments: std::option::Option::None,
            resolved_at: std::option::Option::None,
        };
        self.requests.write().insert(request.id.clone(), request.clone());
        println!("[GateService] created transition request {} ({} -> {})", request.id, request.from_phase, request.to_phase);
        std::result::Result::Ok(request)
    }

    /// Approves a pending request: marks it resolved, advances the
    /// project's `current_phase`, completes the old `PhaseState`, and starts
    /// the new one. All mutations happen under a single write lock per map.
    ///
    /// Only the role the transition's `required_gatekeeper` names may
    /// approve; everyone else is rejected with `UnauthorizedGatekeeper`
    /// before any state changes.
    pub fn approve_transition(&self, request_id: &str, gatekeeper: crate::user::UserRole, comments: std::option::Option<String>) -> std::result::Result<PhaseTransitionRequest, crate::error::PhaseGateError> {
        let today = chrono::Utc::now().date_naive();

        let mut requests = self.requests.write();
        let request = requests.get_mut(request_id).ok_or_else(|| crate::error::PhaseGateError::RequestNotFound(request_id.to_string()))?;
        if request.status != TransitionStatus::Pending {
            return std::result::Result::Err(crate::error::PhaseGateError::AlreadyResolved(request_id.to_string()));
        }
        if !authorized(&request.validation_results.required_gatekeeper, gatekeeper) {
            return std::result::Result::Err(crate::error::PhaseGateError::UnauthorizedGatekeeper {
                request_id: request_id.to_string(),
                gatekeeper,
                required: request.validation_results.required_gatekeeper.clone(),
            });
        }

        request.status = TransitionStatus::Approved;
        request.gatekeeper_comments = comments;
        request.resolved_at = std::option::Option::Some(chrono::Utc::now());
        let resolved = request.clone();

        let mut projects = self.projects.write();
        if let std::option::Option::Some(project) = projects.get_mut(&resolved.project_id) {
            project.current_phase = resolved.to_phase;
            if let std::option::Option::Some(old_phase) = project.phases.get_mut(&resolved.from_phase) {
                old_phase.status = crate::project::PhaseStatus::Completed;
                old_phase.end_date = std::option::Option::Some(today);
            }
            if let std::option::Option::Some(new_phase) = project.phases.get_mut(&resolved.to_phase) {
                new_phase.status = crate::project::PhaseStatus::InProgress;
                new_phase.start_date = std::option::Option::Some(today);
            }
        }

        println!("[GateService] approved transition {request_id}, project {} now at {}", resolved.project_id, resolved.to_phase);
        std::result::Result::Ok(resolved)
    }

    /// Rejects a pending request. A reason is required, and only the
    /// request's required gatekeeper role may reject; no project state
    /// changes.
    pub fn reject_transition(&self, request_id: &str, gatekeeper: crate::user::UserRole, reason: String) -> std::result::Result<PhaseTransitionRequest, crate::error::PhaseGateError> {
        if reason.trim().is_empty() {
            return std::result::Result::Err(crate::error::PhaseGateError::MissingRejectionReason);
        }

        let mut requests = self.requests.write();
        let request = requests.get_mut(request_id).ok_or_else(|| crate::error::PhaseGateError::RequestNotFound(request_id.to_string()))?;
        if request.status != TransitionStatus::Pending {
            return std::result::Result::Err(crate::error::PhaseGateError::AlreadyResolved(request_id.to_string()));
        }
        if !authorized(&request.validation_results.required_gatekeeper, gatekeeper) {
            return std::result::Result::Err(crate::error::PhaseGateError::UnauthorizedGatekeeper {
                request_id: request_id.to_string(),
                gatekeeper,
                required: request.validation_results.required_gatekeeper.clone(),
            });
        }

        request.status = TransitionStatus::Rejected;
        request.gatekeeper_comments = std::option::Option::Some(reason);
        request.resolved_at = std::option::Option::Some(chrono::Utc::now());
        println!("[GateService] rejected transition {request_id}");
        std::result::Result::Ok(request.clone())
    }
}

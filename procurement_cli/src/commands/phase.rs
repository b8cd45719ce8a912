//! Implementation of the `phase-status` / `phase-request` / `phase-approve`
//! / `phase-reject` commands: drive the Phase-Gate Service against a local
//! JSON state snapshot.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial phase-gate commands.

fn parse_role(raw: &str) -> anyhow::Result<phase_gate::user::UserRole> {
    match raw {
        "contracting_officer" => std::result::Result::Ok(phase_gate::user::UserRole::ContractingOfficer),
        "program_manager" => std::result::Result::Ok(phase_gate::user::UserRole::ProgramManager),
        "admin" => std::result::Result::Ok(phase_gate::user::UserRole::Admin),
        "viewer" => std::result::Result::Ok(phase_gate::user::UserRole::Viewer),
        other => anyhow::bail!("unknown role '{other}'; expected one of contracting_officer, program_manager, admin, viewer"),
    }
}

fn parse_phase(raw: &str) -> anyhow::Result<phase_gate::phase::PhaseName> {
    phase_gate::phase::PhaseName::parse(raw).ok_or_else(|| anyhow::anyhow!("unknown phase '{raw}'; expected one of pre_solicitation, solicitation, post_solicitation, award"))
}

fn ensure_parent_dir(path: &std::path::Path) -> anyhow::Result<()> {
    if let std::option::Option::Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::result::Result::Ok(())
}

pub async fn status(project_id: &str, state_file: &str) -> anyhow::Result<()> {
    let path = std::path::Path::new(state_file);
    let service = crate::state::load_gate_service(path, phase_gate::config::GateConfig::default())?;

    let project = service.get_project(project_id).ok_or_else(|| anyhow::anyhow!("project '{project_id}' not found in {state_file}"))?;
    println!("Project {} ({})", project.id, project.program_name);
    println!("Current phase: {}", project.current_phase);
    for phase in phase_gate::phase::PhaseName::order() {
        let state = &project.phases[phase];
        println!("  {phase}: {:?} (start: {:?}, end: {:?})", state.status, state.start_date, state.end_date);
    }
    println!("Documents:");
    for document in &project.documents {
        println!("  {} — {:?}", document.document_name, document.status);
    }

    let pending: std::vec::Vec<_> = service
        .list_requests_for_project(project_id)
        .into_iter()
        .filter(|request| request.status == phase_gate::transition::TransitionStatus::Pending)
        .collect();
    if !pending.is_empty() {
        println!("Pending requests:");
        for request in pending {
            println!("  {} — {} -> {}", request.id, request.from_phase, request.to_phase);
        }
    }

    std::result::Result::Ok(())
}

pub async fn request(project_id: &str, program: std::option::Option<&str>, to_phase: &str, requested_by: &str, role: &str, state_file: &str) -> anyhow::Result<()> {
    let path = std::path::Path::new(state_file);
    ensure_parent_dir(path)?;
    let service = crate::state::load_gate_service(path, phase_gate::config::GateConfig::default())?;

    if service.get_project(project_id).is_none() {
        let program_name = program.ok_or_else(|| anyhow::anyhow!("project '{project_id}' does not exist yet; pass --program to create it"))?;
        service.add_project(phase_gate::project::Project::new(project_id, program_name));
    }

    let to_phase = parse_phase(to_phase)?;
    let requester_role = parse_role(role)?;

    let request = service.create_transition_request(project_id, to_phase, requested_by, requester_role, std::option::Option::None)?;
    println!("Created transition request {} ({} -> {})", request.id, request.from_phase, request.to_phase);
    if !request.validation_results.warnings.is_empty() {
        println!("Warnings:");
        for warning in &request.validation_results.warnings {
            println!("  - {warning}");
        }
    }

    crate::state::save_gate_service(path, &service, &[project_id.to_string()])?;
    std::result::Result::Ok(())
}

pub async fn approve(request_id: &str, role: &str, comments: std::option::Option<String>, state_file: &str) -> anyhow::Result<()> {
    let path = std::path::Path::new(state_file);
    let service = crate::state::load_gate_service(path, phase_gate::config::GateConfig::default())?;
    let gatekeeper = parse_role(role)?;

    let project_id = service.get_request(request_id).ok_or_else(|| anyhow::anyhow!("request '{request_id}' not found in {state_file}"))?.project_id;
    let resolved = service.approve_transition(request_id, gatekeeper, comments)?;
    println!("Approved {request_id}; project {} now at {}", resolved.project_id, resolved.to_phase);

    crate::state::save_gate_service(path, &service, &[project_id])?;
    std::result::Result::Ok(())
}

pub async fn reject(request_id: &str, role: &str, reason: String, state_file: &str) -> anyhow::Result<()> {
    let path = std::path::Path::new(state_file);
    let service = crate::state::load_gate_service(path, phase_gate::config::GateConfig::default())?;
    let gatekeeper = parse_role(role)?;

    let project_id = service.get_request(request_id).ok_or_else(|| anyhow::anyhow!("request '{request_id}' not found in {state_file}"))?.project_id;
    service.reject_transition(request_id, gatekeeper, reason)?;
    println!("Rejected {request_id}");

    crate::state::save_gate_service(path, &service, &[project_id])?;
    std::result::Result::Ok(())
}

#[cfg(test)]
mod tests {
    #[tokio::test]
    async fn test_request_then_approve_round_trips_through_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("phase_state.json");
        let state_file = state_file.to_str().unwrap();

        super::request("proj-1", std::option::Option::Some("Program Alpha"), "solicitation", "user-1", "contracting_officer", state_file).await.unwrap();

        let service = crate::state::load_gate_service(std::path::Path::new(state_file), phase_gate::config::GateConfig::default()).unwrap();
        let request = service.list_requests_for_project("proj-1").into_iter().next();
        // Project has no documents, so the request must fail to create (TransitionBlocked),
        // and therefore no request is persisted.
        assert!(request.is_none());
    }

    #[tokio::test]
    async fn test_request_fails_when_project_missing_and_no_program_given() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("phase_state.json");
        let result = super::request("proj-missing", std::option::Option::None, "solicitation", "user-1", "contracting_officer", state_file.to_str().unwrap()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_approve_rejects_wrong_gatekeeper_role_then_succeeds_with_right_one() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("phase_state.json");
        let state_file = state_file.to_str().unwrap();

        let service = phase_gate::transition::GateService::new(phase_gate::config::GateConfig::default());
        let project = phase_gate::project::Project::new("proj-2", "Program Alpha")
            .with_document(phase_gate::document::ProjectDocument::new("d1", "Market Research Report", phase_gate::document::DocumentStatus::Approved))
            .with_document(phase_gate::document::ProjectDocument::new("d2", "Acquisition Plan", phase_gate::document::DocumentStatus::Approved))
            .with_document(phase_gate::document::ProjectDocument::new("d3", "Independent Government Cost Estimate", phase_gate::document::DocumentStatus::Approved));
        service.add_project(project);
        crate::state::save_gate_service(std::path::Path::new(state_file), &service, &["proj-2".to_string()]).unwrap();

        super::request("proj-2", std::option::Option::None, "solicitation", "user-1", "contracting_officer", state_file).await.unwrap();
        let loaded = crate::state::load_gate_service(std::path::Path::new(state_file), phase_gate::config::GateConfig::default()).unwrap();
        let request_id = loaded.list_requests_for_project("proj-2").into_iter().next().unwrap().id;

        let wrong_role = super::approve(&request_id, "program_manager", std::option::Option::None, state_file).await;
        assert!(wrong_role.is_err());

        super::approve(&request_id, "contracting_officer", std::option::Option::None, state_file).await.unwrap();
        let loaded = crate::state::load_gate_service(std::path::Path::new(state_file), phase_gate::config::GateConfig::default()).unwrap();
        assert_eq!(loaded.get_project("proj-2").unwrap().current_phase, phase_gate::phase::PhaseName::Solicitation);
    }

    #[tokio::test]
    async fn test_approve_unknown_request_errors() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("phase_state.json");
        let result = super::approve("missing-request", "contracting_officer", std::option::Option::None, state_file.to_str().unwrap()).await;
        assert!(result.is_err());
    }
}

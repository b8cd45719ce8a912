//! Local on-disk snapshot of phase-gate state, so a one-shot CLI invocation
//! can pick up where the previous invocation left off.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial JSON snapshot load/save.

#[derive(serde::Serialize, serde::Deserialize, Default)]
struct Snapshot {
    projects: std::vec::Vec<phase_gate::project::Project>,
    requests: std::vec::Vec<phase_gate::transition::PhaseTransitionRequest>,
}

/// Loads a `GateService` from `path`, or an empty one if the file does not
/// yet exist.
pub fn load_gate_service(path: &std::path::Path, config: phase_gate::config::GateConfig) -> anyhow::Result<phase_gate::transition::GateService> {
    let service = phase_gate::transition::GateService::new(config);
    if !path.exists() {
        return std::result::Result::Ok(service);
    }

    let bytes = std::fs::read(path)?;
    let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
    let mut max_sequence = 0u64;
    for project in snapshot.projects {
        service.add_project(project);
    }
    for request in snapshot.requests {
        if let std::option::Option::Some(sequence) = request.id.rsplit('-').next().and_then(|s| s.parse::<u64>().ok()) {
            max_sequence = max_sequence.max(sequence + 1);
        }
        service.restore_request(request);
    }
    service.raise_counter_floor(max_sequence);
    std::result::Result::Ok(service)
}

/// Persists every known project and request back to `path` atomically.
pub fn save_gate_service(path: &std::path::Path, service: &phase_gate::transition::GateService, project_ids: &[String]) -> anyhow::Result<()> {
    let mut projects = std::vec::Vec::new();
    let mut requests = std::vec::Vec::new();
    for project_id in project_ids {
        if let std::option::Option::Some(project) = service.get_project(project_id) {
            requests.extend(service.list_requests_for_project(project_id));
            projects.push(project);
        }
    }

    let snapshot = Snapshot { projects, requests };
    let serialized = serde_json::to_vec_pretty(&snapshot)?;
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, &serialized)?;
    std::fs::rename(&temp_path, path)?;
    std::result::Result::Ok(())
}

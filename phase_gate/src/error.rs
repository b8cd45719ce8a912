//! Error taxonomy for the phase-gate service.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial PhaseGateError enum.

#[derive(Debug, thiserror::Error)]
pub enum PhaseGateError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("phase transition blocked: {0:?}")]
    TransitionBlocked(std::vec::Vec<String>),

    #[error("transition request not found: {0}")]
    RequestNotFound(String),

    #[error("transition request {0} was already resolved")]
    AlreadyResolved(String),

    #[error("rejection requires a reason")]
    MissingRejectionReason,

    #[error("gatekeeper role {gatekeeper:?} is not authorized to resolve transition {request_id}; required: {required:?}")]
    UnauthorizedGatekeeper { request_id: String, gatekeeper: crate::user::UserRole, required: std::option::Option<String> },
}

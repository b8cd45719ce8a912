//! Static phase-gate configuration: required documents per phase and the
//! gatekeeper role for each valid transition.
//!
//! The source system reads this from `phase_definitions.yaml` at startup;
//! here it is a compiled-in default, with `GateConfig::default()` giving
//! callers a hook to substitute their own document/gatekeeper tables without
//! touching the validation logic.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial GateConfig with compiled-in defaults.

/// Required documents and gatekeeper table for the procurement lifecycle.
#[derive(Debug, Clone)]
pub struct GateConfig {
    required_documents: std::collections::BTreeMap<crate::phase::PhaseName, std::vec::Vec<String>>,
    gatekeepers: std::collections::BTreeMap<(crate::phase::PhaseName, crate::phase::PhaseName), String>,
    /// Whether an existing-but-unapproved document blocks a transition
    /// instead of merely producing a warning. Defaults to `false`, matching
    /// the source system's default workflow.
    pub blocking_on_unapproved: bool,
}

impl GateConfig {
    pub fn required_documents(&self, phase: crate::phase::PhaseName) -> &[String] {
        self.required_documents.get(&phase).map(|docs| docs.as_slice()).unwrap_or(&[])
    }

    pub fn gatekeeper(&self, from_phase: crate::phase::PhaseName, to_phase: crate::phase::PhaseName) -> std::option::Option<&str> {
        self.gatekeepers.get(&(from_phase, to_phase)).map(|s| s.as_str())
    }
}

impl std::default::Default for GateConfig {
    fn default() -> Self {
        use crate::phase::PhaseName::*;

        let mut required_documents = std::collections::BTreeMap::new();
        required_documents.insert(
            PreSolicitation,
            vec![
                "Market Research Report".to_string(),
                "Acquisition Plan".to_string(),
                "Independent Government Cost Estimate".to_string(),
            ],
        );
        required_documents.insert(
            Solicitation,
            vec!["Performance Work Statement".to_string(), "Solicitation Document".to_string()],
        );
        required_documents.insert(PostSolicitation, vec!["Evaluation Scorecard".to_string()]);
        required_documents.insert(Award, vec![]);

        let mut gatekeepers = std::collections::BTreeMap::new();
        gatekeepers.insert((PreSolicitation, Solicitation), "Contracting Officer".to_string());
        gatekeepers.insert((Solicitation, PostSolicitation), "Source Selection Authority".to_string());
        gatekeepers.insert((PostSolicitation, Award), "Program Manager".to_string());

        GateConfig { required_documents, gatekeepers, blocking_on_unapproved: false }
    }
}

//! Agent registry: `doc_type -> Agent` resolved at startup.
//!
//! Replaces a runtime class-lookup pattern in the source system with an
//! explicit registry the coordinator holds as a dependency, per the
//! dynamic-dispatch redesign guidance.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial AgentRegistry.

/// Maps artifact doc_types to the agent that produces them.
pub struct AgentRegistry {
    agents: std::collections::HashMap<String, std::sync::Arc<dyn crate::agent::Agent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        AgentRegistry { agents: std::collections::HashMap::new() }
    }

    pub fn register(&mut self, agent: std::sync::Arc<dyn crate::agent::Agent>) {
        self.agents.insert(agent.doc_type().to_string(), agent);
    }

    pub fn get(&self, doc_type: &str) -> std::option::Option<std::sync::Arc<dyn crate::agent::Agent>> {
        self.agents.get(doc_type).cloned()
    }

    pub fn doc_types(&self) -> std::vec::Vec<&str> {
        self.agents.keys().map(|key| key.as_str()).collect()
    }
}

impl std::default::Default for AgentRegistry {
    fn default() -> Self {
        AgentRegistry::new()
    }
}

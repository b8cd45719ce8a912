//! CLI-level configuration: which artifact types the Agent Coordinator can
//! produce and the prompt template each uses.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial AgentDefinition and default roster.

/// One agent's doc_type, its dependency doc_types, and its prompt template.
/// Loaded from a JSON config file or falls back to `default_agent_definitions`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AgentDefinition {
    pub doc_type: String,
    #[serde(default)]
    pub dependencies: std::vec::Vec<String>,
    pub prompt_template: String,
}

/// Reads agent definitions from a JSON array at `path`.
pub fn load_agent_definitions(path: &std::path::Path) -> anyhow::Result<std::vec::Vec<AgentDefinition>> {
    let bytes = std::fs::read(path)?;
    let definitions: std::vec::Vec<AgentDefinition> = serde_json::from_slice(&bytes)?;
    std::result::Result::Ok(definitions)
}

const DEFAULT_TEMPLATE: &str = "Draft the {{document_name}} for the \"{{program}}\" procurement program.\n\
Use only the facts below; do not invent figures that contradict them.\n\n\
Extracted fields:\n{{extracted_fields}}\n\n\
Prior related documents:\n{{ancestor_documents}}\n\n\
Respond as a single JSON object: {\"content\": \"<markdown document body>\", \"fields\": {<any new typed facts>}}.";

/// The standard procurement artifact roster: market research and cost
/// estimate feed the acquisition plan; the acquisition plan and the
/// performance work statement feed the solicitation document; the
/// solicitation document feeds the evaluation scorecard; the scorecard
/// feeds the award memo.
pub fn default_agent_definitions() -> std::vec::Vec<AgentDefinition> {
    let make = |doc_type: &str, dependencies: &[&str]| AgentDefinition {
        doc_type: doc_type.to_string(),
        dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        prompt_template: DEFAULT_TEMPLATE.to_string(),
    };

    std::vec![
        make("market_research_report", &[]),
        make("igce", &[]),
        make("acquisition_plan", &["market_research_report", "igce"]),
        make("performance_work_statement", &["acquisition_plan"]),
        make("solicitation_document", &["performance_work_statement"]),
        make("evaluation_scorecard", &["solicitation_document"]),
        make("award_memo", &["evaluation_scorecard"]),
    ]
}

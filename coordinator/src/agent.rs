//! The Agent contract: one artifact type in, one content document plus a
//! structured extract out.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial Agent port, UsageTracker, and the
//!   markdown post-processing transform enforced by the base contract.

/// An assumption supplied to a generation task.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Assumption {
    pub id: String,
    pub text: String,
    pub source: std::option::Option<String>,
}

/// Everything an Agent needs to produce one artifact.
pub struct AgentTask {
    pub document_name: String,
    pub project_info: extraction::retriever::ProjectInfo,
    pub extracted: extraction::extractor::ExtractedRecord,
    pub assumptions: std::vec::Vec<Assumption>,
    /// Ancestor artifact content, truncated to the configured cap, keyed by
    /// dependency name.
    pub ancestor_content: std::collections::BTreeMap<String, String>,
    /// The doc_id each already-produced ancestor was persisted under, keyed
    /// the same way as `ancestor_content`. Lets an Agent populate
    /// `AgentOutput::references` with real lineage targets.
    pub ancestor_doc_ids: std::collections::BTreeMap<String, String>,
    pub deadline: std::option::Option<std::time::Duration>,
}

/// What an Agent produces for one artifact.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AgentOutput {
    pub content: String,
    pub structured_extract: serde_json::Value,
    pub metadata: serde_json::Value,
    /// Dependency type -> doc_id, populated when cross-document data was consumed.
    pub references: std::collections::BTreeMap<String, String>,
}

/// Accumulates token usage across model calls. Passed explicitly through
/// the call chain rather than mutated via an ambient "current tracker"
/// field, so usage attribution never depends on call order.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UsageTracker {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub call_count: u64,
}

impl UsageTracker {
    pub fn new() -> Self {
        UsageTracker::default()
    }

    pub fn record(&mut self, prompt_tokens: u64, completion_tokens: u64) {
        self.prompt_tokens += prompt_tokens;
        self.completion_tokens += completion_tokens;
        self.call_count += 1;
    }

    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// One artifact type's generation capability.
///
/// Implementations must produce only fields they can justify from inputs
/// and must never invent scalar values that contradict extracted facts.
#[async_trait::async_trait]
pub trait Agent: std::marker::Send + std::marker::Sync {
    /// The artifact type this agent produces, e.g. `"market_research_report"`.
    fn doc_type(&self) -> &str;

    /// The dependency doc_types this agent's artifact requires, in
    /// declaration order.
    fn dependencies(&self) -> &[&str];

    async fn execute(&self, task: &AgentTask, tracker: &mut UsageTracker) -> std::result::Result<AgentOutput, std::string::String>;
}

/// Removes empty list markers, collapses blank lines inside lists, and
/// strips model-emitted code fences, the deterministic cleanup every Agent's
/// raw model output is passed through.
///
/// Idempotent: running it twice produces the same output as running it once.
pub fn clean_markdown_lists(content: &str) -> String {
    let code_fence = regex::Regex::new(r"(?m)^[ \t]*```[a-zA-Z0-9_+-]*[ \t]*\n?").unwrap();
    let empty_bullet = regex::Regex::new(r"(?m)^\s*[-*]\s*$").unwrap();
    let empty_numbered = regex::Regex::new(r"(?m)^\s*\d+\.\s*$").unwrap();

    let mut cleaned = code_fence.replace_all(content, "").to_string();
    for _ in 0..3 {
        cleaned = empty_bullet.replace_all(&cleaned, "").to_string();
        cleaned = empty_numbered.replace_all(&cleaned, "").to_string();
    }

    let bullet_gap = regex::Regex::new(r"(?m)(^[ \t]*[-*]\s+[^\n]+)\n\n+([ \t]*[-*]\s)").unwrap();
    cleaned = bullet_gap.replace_all(&cleaned, "$1\n$2").to_string();

    let numbered_gap = regex::Regex::new(r"(?m)(^[ \t]*\d+\.\s+[^\n]+)\n\n+([ \t]*\d+\.\s)").unwrap();
    cleaned = numbered_gap.replace_all(&cleaned, "$1\n$2").to_string();

    let extra_blank_lines = regex::Regex::new(r"\n{3,}").unwrap();
    extra_blank_lines.replace_all(&cleaned, "\n\n").to_string()
}

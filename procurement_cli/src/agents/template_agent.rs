//! A configuration-driven Agent: one instance per artifact type, backed by
//! a prompt template and an LLM completion port.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial TemplateAgent.

/// An Agent whose `doc_type`/`dependencies`/prompt template are supplied at
/// construction time from CLI configuration rather than fixed per Rust type.
///
/// `doc_type` and `dependencies` are leaked to `&'static str` once at
/// startup: the `Agent` trait's `dependencies(&self) -> &[&str]` signature
/// requires a `'static` slice, and this adapter's instances live for the
/// whole process, so the one-time leak costs nothing a long-running CLI
/// invocation would notice.
pub struct TemplateAgent {
    doc_type: &'static str,
    dependencies: std::vec::Vec<&'static str>,
    prompt_template: String,
    completion: std::sync::Arc<dyn extraction::json_completion::JsonCompletionPort>,
}

impl TemplateAgent {
    pub fn new(
        doc_type: String,
        dependencies: std::vec::Vec<String>,
        prompt_template: String,
        completion: std::sync::Arc<dyn extraction::json_completion::JsonCompletionPort>,
    ) -> Self {
        let doc_type: &'static str = std::boxed::Box::leak(doc_type.into_boxed_str());
        let dependencies: std::vec::Vec<&'static str> = dependencies
            .into_iter()
            .map(|d| -> &'static str { std::boxed::Box::leak(d.into_boxed_str()) })
            .collect();
        TemplateAgent { doc_type, dependencies, prompt_template, completion }
    }

    fn render_prompt(&self, task: &coordinator::agent::AgentTask) -> String {
        let extracted_json = serde_json::to_string_pretty(&task.extracted.fields).unwrap_or_default();
        let ancestors: std::string::String = task
            .ancestor_content
            .iter()
            .map(|(name, content)| std::format!("### {name}\n{content}\n"))
            .collect::<std::vec::Vec<_>>()
            .join("\n");

        self.prompt_template
            .replace("{{document_name}}", &task.document_name)
            .replace("{{program}}", &task.project_info.program_name)
            .replace("{{extracted_fields}}", &extracted_json)
            .replace("{{ancestor_documents}}", &ancestors)
    }
}

#[async_trait::async_trait]
impl coordinator::agent::Agent for TemplateAgent {
    fn doc_type(&self) -> &str {
        self.doc_type
    }

    fn dependencies(&self) -> &[&str] {
        &self.dependencies
    }

    async fn execute(
        &self,
        task: &coordinator::agent::AgentTask,
        tracker: &mut coordinator::agent::UsageTracker,
    ) -> std::result::Result<coordinator::agent::AgentOutput, std::string::String> {
        let prompt = self.render_prompt(task);
        let response = self.completion.complete_json(&prompt).await?;

        // The completion is expected to return a JSON object with a
        // `content` string and an optional `fields` object; fall back to
        // treating the whole response as content if it isn't JSON at all.
        let (content, structured_extract) = match extraction::json_completion::parse_first_balanced_object(&response) {
            std::option::Option::Some(serde_json::Value::Object(map)) => {
                let content = map
                    .get("content")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| response.clone());
                let structured = map.get("fields").cloned().unwrap_or(serde_json::Value::Null);
                (content, structured)
            }
            _ => (response, serde_json::Value::Null),
        };

        tracker.record((prompt.len() / 4) as u64, (content.len() / 4) as u64);

        let references: std::collections::BTreeMap<String, String> = self
            .dependencies
            .iter()
            .filter_map(|dep| task.ancestor_doc_ids.get(*dep).map(|doc_id| ((*dep).to_string(), doc_id.clone())))
            .collect();

        std::result::Result::Ok(coordinator::agent::AgentOutput {
            content,
            structured_extract,
            metadata: serde_json::json!({ "doc_type": self.doc_type }),
            references,
        })
    }
}

#[cfg(test)]
mod tests {
    use coordinator::agent::Agent;

    struct StubCompletion {
        response: String,
    }

    #[async_trait::async_trait]
    impl extraction::json_completion::JsonCompletionPort for StubCompletion {
        async fn complete_json(&self, _prompt: &str) -> std::result::Result<std::string::String, std::string::String> {
            std::result::Result::Ok(self.response.clone())
        }
    }

    fn task() -> coordinator::agent::AgentTask {
        let mut ancestor_doc_ids = std::collections::BTreeMap::new();
        ancestor_doc_ids.insert("acquisition_plan".to_string(), "doc-123".to_string());

        coordinator::agent::AgentTask {
            document_name: "Market Research Report".to_string(),
            project_info: extraction::retriever::ProjectInfo {
                program_name: "Test Program".to_string(),
                description: "A test procurement program.".to_string(),
                project_type: "services".to_string(),
                current_phase: "pre_solicitation".to_string(),
                estimated_value: std::option::Option::None,
                contract_type: std::option::Option::None,
                period_of_performance: std::option::Option::None,
            },
            extracted: extraction::extractor::ExtractedRecord {
                fields: std::collections::BTreeMap::new(),
                metadata: extraction::extractor::ExtractionMetadata {
                    stage1_count: 0,
                    stage2_count: 0,
                    stage3_count: 0,
                    stage3_attempted: false,
                    stage3_error: std::option::Option::None,
                },
            },
            assumptions: std::vec::Vec::new(),
            ancestor_content: std::collections::BTreeMap::new(),
            ancestor_doc_ids,
            deadline: std::option::Option::None,
        }
    }

    #[tokio::test]
    async fn test_execute_extracts_content_and_references_from_json_response() {
        let agent = super::TemplateAgent::new(
            "market_research_report".to_string(),
            std::vec!["acquisition_plan".to_string()],
            "Write the {{document_name}} for {{program}}.".to_string(),
            std::sync::Arc::new(StubCompletion { response: r#"{"content": "Body text here.", "fields": {"total_cost": 1000}}"#.to_string() }),
        );
        let mut tracker = coordinator::agent::UsageTracker::new();
        let output = agent.execute(&task(), &mut tracker).await.unwrap();
        assert_eq!(output.content, "Body text here.");
        assert_eq!(output.structured_extract["total_cost"], 1000);
        assert_eq!(output.references.get("acquisition_plan"), std::option::Option::Some(&"doc-123".to_string()));
        assert!(tracker.call_count == 1);
    }

    #[tokio::test]
    async fn test_execute_falls_back_to_raw_text_when_response_not_json() {
        let agent = super::TemplateAgent::new(
            "market_research_report".to_string(),
            std::vec::Vec::new(),
            "irrelevant".to_string(),
            std::sync::Arc::new(StubCompletion { response: "Plain prose, no JSON here.".to_string() }),
        );
        let mut tracker = coordinator::agent::UsageTracker::new();
        let output = agent.execute(&task(), &mut tracker).await.unwrap();
        assert_eq!(output.content, "Plain prose, no JSON here.");
        assert_eq!(output.structured_extract, serde_json::Value::Null);
    }

    #[test]
    fn test_doc_type_and_dependencies_are_leaked_static() {
        let agent = super::TemplateAgent::new(
            "award_memo".to_string(),
            std::vec!["solicitation_document".to_string()],
            "template".to_string(),
            std::sync::Arc::new(StubCompletion { response: "{}".to_string() }),
        );
        assert_eq!(agent.doc_type(), "award_memo");
        assert_eq!(agent.dependencies(), &["solicitation_document"]);
    }
}

//! The Agent Coordinator: executes a GenerationTask end-to-end.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial AgentCoordinator implementing the
//!   dependency-resolution / context-assembly / per-artifact execution
//!   protocol.

const ANCESTOR_CONTENT_CAP: usize = 2000;

/// Per-artifact outcome recorded on the task.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ArtifactStatus {
    Generated { doc_id: String },
    CacheHit { doc_id: String },
    Failed { error: String },
    Skipped { reason: String },
}

/// Everything the coordinator needs to run one task, passed explicitly
/// rather than held as ambient module-level singletons.
pub struct GenerationContext {
    pub project_id: String,
    pub program: String,
    pub project_info: extraction::retriever::ProjectInfo,
    pub retriever: std::sync::Arc<extraction::retriever::Retriever>,
    pub field_specs: std::vec::Vec<extraction::field::FieldSpec>,
    pub completion: std::option::Option<std::sync::Arc<dyn extraction::json_completion::JsonCompletionPort>>,
    /// The Phase-Gate Service tracking `project_id`'s document checklist, if
    /// this task is scoped to a phase-gated project. When present, ancestor
    /// eligibility (spec-mandated: approved, uploaded, or already generated)
    /// is checked against it, and successful generations are persisted back
    /// to the matching `ProjectDocument`.
    pub phase_gate: std::option::Option<std::sync::Arc<phase_gate::transition::GateService>>,
    /// doc_type -> the Phase-Gate `ProjectDocument.document_name` it
    /// corresponds to. doc_types absent here fall back to
    /// `default_display_name`.
    pub doc_type_names: std::collections::BTreeMap<String, String>,
}

/// Title-cases a snake_case doc_type into the display name a Phase-Gate
/// `ProjectDocument` would carry, e.g. `performance_work_statement` ->
/// `Performance Work Statement`. Acronym doc_types are special-cased since
/// naive title-casing can't recover their expansion.
fn default_display_name(doc_type: &str) -> String {
    if doc_type.eq_ignore_ascii_case("igce") {
        return "Independent Government Cost Estimate".to_string();
    }
    doc_type
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                std::option::Option::Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                std::option::Option::None => std::string::String::new(),
            }
        })
        .collect::<std::vec::Vec<_>>()
        .join(" ")
}

/// Whether `dep` is an eligible ancestor for the artifact about to run:
/// already generated or cache-hit within this same task, or — when a
/// Phase-Gate handle is wired in — already approved, uploaded, or carrying
/// `generated_content` from a prior task.
fn ancestor_eligible(dep: &str, statuses: &std::collections::BTreeMap<String, ArtifactStatus>, ctx: &GenerationContext) -> bool {
    match statuses.get(dep) {
        std::option::Option::Some(ArtifactStatus::Generated { .. }) | std::option::Option::Some(ArtifactStatus::CacheHit { .. }) => return true,
        std::option::Option::Some(ArtifactStatus::Failed { .. }) | std::option::Option::Some(ArtifactStatus::Skipped { .. }) => return false,
        std::option::Option::None => {}
    }

    match &ctx.phase_gate {
        std::option::Option::Some(gate) => {
            let document_name = ctx.doc_type_names.get(dep).cloned().unwrap_or_else(|| default_display_name(dep));
            gate.document_state(&ctx.project_id, &document_name).map(|document| document.has_usable_content()).unwrap_or(false)
        }
        std::option::Option::None => false,
    }
}

/// Result of running a task: the per-artifact outcomes and the progress
/// events that were published, returned for callers that want to inspect
/// them synchronously (tests, synchronous CLI callers).
pub struct GenerationReport {
    pub statuses: std::collections::BTreeMap<String, ArtifactStatus>,
    pub events: std::vec::Vec<crate::generation_task::ProgressEvent>,
}

pub struct AgentCoordinator {
    registry: crate::registry::AgentRegistry,
    metadata_store: std::sync::Arc<metadata_store::store::MetadataStore>,
    incremental_cache: crate::incremental_cache::IncrementalCache,
    cache: std::sync::Arc<cache_layer::store::CacheLayer>,
}

impl AgentCoordinator {
    pub fn new(
        registry: crate::registry::AgentRegistry,
        metadata_store: std::sync::Arc<metadata_store::store::MetadataStore>,
        cache: std::sync::Arc<cache_layer::store::CacheLayer>,
    ) -> Self {
        AgentCoordinator {
            registry,
            metadata_store,
            incremental_cache: crate::incremental_cache::IncrementalCache::new(cache.clone()),
            cache,
        }
    }

    /// Runs `task` to completion: resolves dependency order, assembles
    /// context, and executes each artifact's agent in order, persisting
    /// results and lineage and emitting progress events as it goes.
    pub async fn run(&self, task: &mut crate::generation_task::GenerationTask, ctx: &GenerationContext) -> GenerationReport {
        let mut events = std::vec::Vec::new();
        task.status = crate::generation_task::TaskStatus::Running;
        self.emit(&mut events, task, ctx, 0, "task started".to_string(), crate::generation_task::EventType::Started);

        let is_available = |doc_type: &str| -> bool {
            match &ctx.phase_gate {
                std::option::Option::Some(gate) => {
                    let document_name = ctx.doc_type_names.get(doc_type).cloned().unwrap_or_else(|| default_display_name(doc_type));
                    gate.document_state(&ctx.project_id, &document_name).map(|document| document.has_usable_content()).unwrap_or(false)
                }
                std::option::Option::None => false,
            }
        };

        let order = match crate::dependency_order::resolve_order(&task.document_names, &self.registry, &is_available) {
            std::result::Result::Ok(order) => order,
            std::result::Result::Err(error) => {
                task.status = crate::generation_task::TaskStatus::Failed;
                task.errors.push(error.to_string());
                self.emit(&mut events, task, ctx, task.progress, error.to_string(), crate::generation_task::EventType::Error);
                return GenerationReport { statuses: std::collections::BTreeMap::new(), events };
            }
        };

        let mut statuses: std::collections::BTreeMap<String, ArtifactStatus> = std::collections::BTreeMap::new();
        let mut ancestor_content: std::collections::BTreeMap<String, String> = std::collections::BTreeMap::new();
        let mut ancestor_doc_ids: std::collections::BTreeMap<String, String> = std::collections::BTreeMap::new();
        let mut dependency_content_hashes: std::collections::BTreeMap<String, String> = std::collections::BTreeMap::new();
        let mut any_generated = false;
        let mut any_failed = false;

        for doc_type in order.iter() {
            if let std::option::Option::Some(agent) = self.registry.get(doc_type) {
                task.dependencies.insert(doc_type.clone(), agent.dependencies().iter().map(|d| d.to_string()).collect());
            }
        }

        let total = order.len().max(1);
        for (index, doc_type) in order.iter().enumerate() {
            let agent = match self.registry.get(doc_type) {
                std::option::Option::Some(agent) => agent,
                std::option::Option::None => continue,
            };

            let missing_deps: std::vec::Vec<String> = agent.dependencies().iter().filter(|dep| !ancestor_eligible(dep, &statuses, ctx)).map(|d| d.to_string()).collect();

            if !missing_deps.is_empty() {
                let reason = std::format!("missing_dependency: {missing_deps:?}");
                statuses.insert(doc_type.clone(), ArtifactStatus::Skipped { reason: reason.clone() });
                any_failed = true;
                self.emit(&mut events, task, ctx, progress_for(index, total), std::format!("{doc_type} skipped: {reason}"), crate::generation_task::EventType::Error);
                continue;
            }

            let assumptions_for_hash: std::vec::Vec<crate::hashing::AssumptionForHash> = task
                .assumptions
                .iter()
                .map(|a| crate::hashing::AssumptionForHash { id: a.id.clone(), text: a.text.clone() })
                .collect();

            let input_hash = crate::hashing::compute_generation_hash(
                doc_type,
                &assumptions_for_hash,
                &dependency_content_hashes,
                std::option::Option::Some(&ctx.project_id),
                std::option::Option::Some(&ctx.project_info.current_phase),
                std::option::Option::None,
                std::option::Option::None,
            );

            if let std::option::Option::Some(cached) = self.incremental_cache.check(doc_type, &input_hash) {
                let doc_id = cached.get("doc_id").and_then(|v| v.as_str()).unwrap_or_default().to_string();
                let content = cached.get("content").and_then(|v| v.as_str()).unwrap_or_default().to_string();
                ancestor_content.insert(doc_type.clone(), truncate(&content, ANCESTOR_CONTENT_CAP));
                ancestor_doc_ids.insert(doc_type.clone(), doc_id.clone());
                dependency_content_hashes.insert(doc_type.clone(), crate::hashing::compute_content_hash(&content));
                statuses.insert(doc_type.clone(), ArtifactStatus::CacheHit { doc_id });
                self.emit(&mut events, task, ctx, progress_for(index, total), std::format!("{doc_type} served from incremental cache"), crate::generation_task::EventType::CacheHit);
                continue;
            }

            let retrieved_context = ctx
                .retriever
                .retrieve_for_section(doc_type, doc_type, &ctx.project_info, std::option::Option::None)
                .await
                .unwrap_or_default();
            let completion_port = ctx.completion.as_deref();
            let extracted = extraction::extractor::extract(&[], &retrieved_context, &ctx.field_specs, completion_port).await;
            let agent_task = crate::agent::AgentTask {
                document_name: doc_type.clone(),
                project_info: ctx.project_info.clone(),
                extracted,
                assumptions: task.assumptions.clone(),
                ancestor_content: ancestor_content.clone(),
                ancestor_doc_ids: ancestor_doc_ids.clone(),
                deadline: std::option::Option::None,
            };

            let mut tracker = crate::agent::UsageTracker::new();
            match agent.execute(&agent_task, &mut tracker).await {
                std::result::Result::Ok(output) => {
                    let content = crate::agent::clean_markdown_lists(&output.content);
                    let references: std::vec::Vec<(String, String)> = output.references.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

                    let doc_id = match self.metadata_store.save_document(
                        doc_type,
                        &ctx.program,
                        content.clone(),
                        std::option::Option::None,
                        output.structured_extract.clone(),
                        &references,
                    ) {
                        std::result::Result::Ok(id) => id,
                        std::result::Result::Err(error) => {
                            statuses.insert(doc_type.clone(), ArtifactStatus::Failed { error: error.to_string() });
                            any_failed = true;
                            self.emit(&mut events, task, ctx, progress_for(index, total), std::format!("{doc_type} failed to persist: {error}"), crate::generation_task::EventType::Error);
                            continue;
                        }
                    };

                    self.incremental_cache.store(doc_type, &input_hash, &serde_json::json!({ "doc_id": doc_id, "content": content }));

                    let ai_quality_score = output
                        .metadata
                        .get("quality_analysis")
                        .and_then(|qa| qa.get(doc_type))
                        .and_then(|doc_quality| doc_quality.get("score").or_else(|| doc_quality.get("overall_score")))
                        .and_then(|score| score.as_f64());
                    if let std::option::Option::Some(score) = ai_quality_score {
                        if let std::option::Option::Some(qa) = task.quality_analysis.as_object_mut() {
                            qa.insert(doc_type.clone(), serde_json::json!({ "score": score }));
                        }
                    }
                    if let std::option::Option::Some(agent_meta) = task.agent_metadata.as_object_mut() {
                        agent_meta.insert(doc_type.clone(), output.metadata.clone());
                    }

                    if let std::option::Option::Some(gate) = &ctx.phase_gate {
                        let document_name = ctx.doc_type_names.get(doc_type).cloned().unwrap_or_else(|| default_display_name(doc_type));
                        gate.record_document_generated(&ctx.project_id, &document_name, content.clone(), std::option::Option::Some(task.task_id.clone()), ai_quality_score);
                    }

                    ancestor_content.insert(doc_type.clone(), truncate(&content, ANCESTOR_CONTENT_CAP));
                    ancestor_doc_ids.insert(doc_type.clone(), doc_id.clone());
                    dependency_content_hashes.insert(doc_type.clone(), crate::hashing::compute_content_hash(&content));
                    statuses.insert(doc_type.clone(), ArtifactStatus::Generated { doc_id: doc_id.clone() });
                    any_generated = true;
                    self.emit(&mut events, task, ctx, progress_for(index, total), std::format!("{doc_type} generated"), crate::generation_task::EventType::Progress);
                }
                std::result::Result::Err(error) => {
                    statuses.insert(doc_type.clone(), ArtifactStatus::Failed { error: error.clone() });
                    any_failed = true;
                    task.errors.push(std::format!("{doc_type}: {error}"));
                    if let std::option::Option::Some(gate) = &ctx.phase_gate {
                        let document_name = ctx.doc_type_names.get(doc_type).cloned().unwrap_or_else(|| default_display_name(doc_type));
                        gate.record_document_generation_failed(&ctx.project_id, &document_name, std::option::Option::Some(task.task_id.clone()));
                    }
                    self.emit(&mut events, task, ctx, progress_for(index, total), std::format!("{doc_type} failed: {error}"), crate::generation_task::EventType::Error);
                }
            }
        }

        task.status = if any_failed && any_generated {
            crate::generation_task::TaskStatus::PartialFailure
        } else if any_failed {
            crate::generation_task::TaskStatus::PartialFailure
        } else {
            crate::generation_task::TaskStatus::Completed
        };
        task.progress = 100;
        self.emit(&mut events, task, ctx, 100, "task complete".to_string(), crate::generation_task::EventType::Completed);

        GenerationReport { statuses, events }
    }

    fn emit(
        &self,
        events: &mut std::vec::Vec<crate::generation_task::ProgressEvent>,
        task: &mut crate::generation_task::GenerationTask,
        ctx: &GenerationContext,
        progress: u8,
        message: String,
        event_type: crate::generation_task::EventType,
    ) {
        task.progress = task.progress.max(progress);
        let event = crate::generation_task::ProgressEvent {
            task_id: task.task_id.clone(),
            project_id: ctx.project_id.clone(),
            progress: task.progress,
            message,
            event_type,
            extra: serde_json::json!({}),
        };
        self.cache.publish(&std::format!("{}:{}", cache_layer::namespace::CacheNamespace::WS_CHANNEL, ctx.project_id), &event);
        events.push(event);
    }
}

fn progress_for(index: usize, total: usize) -> u8 {
    (((index + 1) as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

fn truncate(content: &str, cap: usize) -> String {
    if content.len() <= cap {
        content.to_string()
    } else {
        content.chars().take(cap).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Agent, AgentOutput, AgentTask, UsageTracker};
    use crate::generation_task::{GenerationTask, TaskStatus};
    use crate::registry::AgentRegistry;

    struct EchoAgent {
        doc_type: &'static str,
        deps: std::vec::Vec<&'static str>,
        should_fail: bool,
    }

    #[async_trait::async_trait]
    impl Agent for EchoAgent {
        fn doc_type(&self) -> &str {
            self.doc_type
        }
        fn dependencies(&self) -> &[&str] {
            &self.deps
        }
        async fn execute(&self, task: &AgentTask, _tracker: &mut UsageTracker) -> std::result::Result<AgentOutput, std::string::String> {
            if self.should_fail {
                return std::result::Result::Err(std::string::String::from("model exploded"));
            }
            std::result::Result::Ok(AgentOutput {
                content: std::format!("# {}\n\ngenerated for {}", task.document_name, task.project_info.program_name),
                structured_extract: serde_json::json!({"doc_type": self.doc_type}),
                metadata: serde_json::json!({}),
                references: std::collections::BTreeMap::new(),
            })
        }
    }

    fn project_info() -> extraction::retriever::ProjectInfo {
        extraction::retriever::ProjectInfo {
            program_name: std::string::String::from("Program Alpha"),
            description: std::string::String::from("desc"),
            project_type: std::string::String::from("services"),
            current_phase: std::string::String::from("pre_solicitation"),
            estimated_value: std::option::Option::Some(1_000_000.0),
            contract_type: std::option::Option::None,
            period_of_performance: std::option::Option::None,
        }
    }

    struct ConstantEmbedder;
    #[async_trait::async_trait]
    impl evidence_store::embedder::Embedder for ConstantEmbedder {
        async fn embed(&self, _text: &str) -> std::result::Result<std::vec::Vec<f32>, std::string::String> {
            std::result::Result::Ok(vec![1.0])
        }
        fn dimension(&self) -> usize {
            1
        }
    }

    fn make_context() -> GenerationContext {
        let store = std::sync::Arc::new(evidence_store::vector_store::VectorStore::new(std::sync::Arc::new(ConstantEmbedder)));
        let cache = std::sync::Arc::new(cache_layer::store::CacheLayer::new(true));
        let retriever = std::sync::Arc::new(extraction::retriever::Retriever::new(store, cache));
        GenerationContext {
            project_id: std::string::String::from("proj-1"),
            program: std::string::String::from("Program Alpha"),
            project_info: project_info(),
            retriever,
            field_specs: std::vec::Vec::new(),
            completion: std::option::Option::None,
            phase_gate: std::option::Option::None,
            doc_type_names: std::collections::BTreeMap::new(),
        }
    }

    fn make_context_with_gate(gate: std::sync::Arc<phase_gate::transition::GateService>, project_id: &str) -> GenerationContext {
        let mut ctx = make_context();
        ctx.project_id = project_id.to_string();
        ctx.phase_gate = std::option::Option::Some(gate);
        ctx
    }

    #[tokio::test]
    async fn test_simple_generation_completes_and_persists_one_document() {
        let mut registry = AgentRegistry::new();
        registry.register(std::sync::Arc::new(EchoAgent { doc_type: "market_research_report", deps: vec![], should_fail: false }));
        let metadata_store = std::sync::Arc::new(metadata_store::store::MetadataStore::new());
        let cache = std::sync::Arc::new(cache_layer::store::CacheLayer::new(true));
        let coordinator = AgentCoordinator::new(registry, metadata_store.clone(), cache);

        let mut task = GenerationTask::new(
            std::string::String::from("task-1"),
            vec![std::string::String::from("market_research_report")],
            vec![crate::agent::Assumption { id: std::string::String::from("scope"), text: std::string::String::from("Cloud logistics system for 2,800 users"), source: std::option::Option::None }],
        );

        let report = coordinator.run(&mut task, &make_context()).await;

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.progress, 100);
        assert_eq!(metadata_store.list_for_program("Program Alpha").len(), 1);
        assert!(matches!(report.statuses["market_research_report"], ArtifactStatus::Generated { .. }));
        assert!(report.events.iter().any(|e| matches!(e.event_type, crate::generation_task::EventType::Started)));
        assert!(report.events.iter().any(|e| matches!(e.event_type, crate::generation_task::EventType::Completed)));
    }

    #[tokio::test]
    async fn test_dependency_generated_before_dependent_and_referenced() {
        let mut registry = AgentRegistry::new();
        registry.register(std::sync::Arc::new(EchoAgent { doc_type: "igce", deps: vec![], should_fail: false }));
        registry.register(std::sync::Arc::new(EchoAgent { doc_type: "acquisition_plan", deps: vec!["igce"], should_fail: false }));
        let metadata_store = std::sync::Arc::new(metadata_store::store::MetadataStore::new());
        let cache = std::sync::Arc::new(cache_layer::store::CacheLayer::new(true));
        let coordinator = AgentCoordinator::new(registry, metadata_store.clone(), cache);

        let mut task = GenerationTask::new(std::string::String::from("task-2"), vec![std::string::String::from("acquisition_plan"), std::string::String::from("igce")], vec![]);
        let report = coordinator.run(&mut task, &make_context()).await;

        assert!(matches!(report.statuses["igce"], ArtifactStatus::Generated { .. }));
        assert!(matches!(report.statuses["acquisition_plan"], ArtifactStatus::Generated { .. }));
    }

    #[tokio::test]
    async fn test_incremental_hit_on_identical_rerun() {
        let mut registry = AgentRegistry::new();
        registry.register(std::sync::Arc::new(EchoAgent { doc_type: "igce", deps: vec![], should_fail: false }));
        let metadata_store = std::sync::Arc::new(metadata_store::store::MetadataStore::new());
        let cache = std::sync::Arc::new(cache_layer::store::CacheLayer::new(true));
        let coordinator = AgentCoordinator::new(registry, metadata_store.clone(), cache);

        let assumptions = vec![crate::agent::Assumption { id: std::string::String::from("a"), text: std::string::String::from("x"), source: std::option::Option::None }];
        let mut task_one = GenerationTask::new(std::string::String::from("t1"), vec![std::string::String::from("igce")], assumptions.clone());
        coordinator.run(&mut task_one, &make_context()).await;

        let mut task_two = GenerationTask::new(std::string::String::from("t2"), vec![std::string::String::from("igce")], assumptions);
        let report_two = coordinator.run(&mut task_two, &make_context()).await;

        assert!(matches!(report_two.statuses["igce"], ArtifactStatus::CacheHit { .. }));
        assert!(report_two.events.iter().any(|e| matches!(e.event_type, crate::generation_task::EventType::CacheHit)));
    }

    #[tokio::test]
    async fn test_partial_failure_skips_dependents_with_missing_dependency() {
        let mut registry = AgentRegistry::new();
        registry.register(std::sync::Arc::new(EchoAgent { doc_type: "igce", deps: vec![], should_fail: true }));
        registry.register(std::sync::Arc::new(EchoAgent { doc_type: "acquisition_plan", deps: vec!["igce"], should_fail: false }));
        let metadata_store = std::sync::Arc::new(metadata_store::store::MetadataStore::new());
        let cache = std::sync::Arc::new(cache_layer::store::CacheLayer::new(true));
        let coordinator = AgentCoordinator::new(registry, metadata_store, cache);

        let mut task = GenerationTask::new(std::string::String::from("t3"), vec![std::string::String::from("acquisition_plan"), std::string::String::from("igce")], vec![]);
        let report = coordinator.run(&mut task, &make_context()).await;

        assert_eq!(task.status, TaskStatus::PartialFailure);
        assert!(matches!(report.statuses["igce"], ArtifactStatus::Failed { .. }));
        assert!(matches!(report.statuses["acquisition_plan"], ArtifactStatus::Skipped { .. }));
    }

    fn gated_project(gate: &phase_gate::transition::GateService) {
        let project = phase_gate::project::Project::new("proj-1", "Program Alpha").with_document(phase_gate::document::ProjectDocument::new(
            "d1",
            "market_research_report",
            phase_gate::document::DocumentStatus::Pending,
        ));
        gate.add_project(project);
    }

    #[tokio::test]
    async fn test_successful_generation_persists_project_document() {
        let mut registry = AgentRegistry::new();
        registry.register(std::sync::Arc::new(EchoAgent { doc_type: "market_research_report", deps: vec![], should_fail: false }));
        let metadata_store = std::sync::Arc::new(metadata_store::store::MetadataStore::new());
        let cache = std::sync::Arc::new(cache_layer::store::CacheLayer::new(true));
        let coordinator = AgentCoordinator::new(registry, metadata_store, cache);

        let gate = std::sync::Arc::new(phase_gate::transition::GateService::new(phase_gate::config::GateConfig::default()));
        gated_project(&gate);
        let ctx = make_context_with_gate(gate.clone(), "proj-1");

        let mut task = GenerationTask::new(std::string::String::from("task-4"), vec![std::string::String::from("market_research_report")], vec![]);
        coordinator.run(&mut task, &ctx).await;

        let document = gate.document_state("proj-1", "market_research_report").unwrap();
        assert_eq!(document.generation_status, phase_gate::document::GenerationStatus::Generated);
        assert!(document.generated_content.is_some());
        assert_eq!(document.generation_task_id.as_deref(), std::option::Option::Some("task-4"));
    }

    #[tokio::test]
    async fn test_task_fails_whole_run_when_unregistered_ancestor_not_yet_available() {
        let mut registry = AgentRegistry::new();
        registry.register(std::sync::Arc::new(EchoAgent { doc_type: "acquisition_plan", deps: vec!["market_research_report"], should_fail: false }));
        let metadata_store = std::sync::Arc::new(metadata_store::store::MetadataStore::new());
        let cache = std::sync::Arc::new(cache_layer::store::CacheLayer::new(true));
        let coordinator = AgentCoordinator::new(registry, metadata_store.clone(), cache);

        let gate = std::sync::Arc::new(phase_gate::transition::GateService::new(phase_gate::config::GateConfig::default()));
        gate.add_project(phase_gate::project::Project::new("proj-1", "Program Alpha"));
        let ctx = make_context_with_gate(gate, "proj-1");

        let mut task = GenerationTask::new(std::string::String::from("task-5"), vec![std::string::String::from("acquisition_plan")], vec![]);
        let report = coordinator.run(&mut task, &ctx).await;

        assert_eq!(task.status, TaskStatus::Failed);
        assert!(report.statuses.is_empty());
        assert_eq!(metadata_store.list_for_program("Program Alpha").len(), 0);
    }

    #[tokio::test]
    async fn test_already_approved_unregistered_ancestor_lets_dependent_generate() {
        let mut registry = AgentRegistry::new();
        registry.register(std::sync::Arc::new(EchoAgent { doc_type: "acquisition_plan", deps: vec!["market_research_report"], should_fail: false }));
        let metadata_store = std::sync::Arc::new(metadata_store::store::MetadataStore::new());
        let cache = std::sync::Arc::new(cache_layer::store::CacheLayer::new(true));
        let coordinator = AgentCoordinator::new(registry, metadata_store, cache);

        let gate = std::sync::Arc::new(phase_gate::transition::GateService::new(phase_gate::config::GateConfig::default()));
        let project = phase_gate::project::Project::new("proj-1", "Program Alpha").with_document(phase_gate::document::ProjectDocument::new(
            "d1",
            "market_research_report",
            phase_gate::document::DocumentStatus::Approved,
        ));
        gate.add_project(project);
        let ctx = make_context_with_gate(gate, "proj-1");

        let mut task = GenerationTask::new(std::string::String::from("task-6"), vec![std::string::String::from("acquisition_plan")], vec![]);
        let report = coordinator.run(&mut task, &ctx).await;

        assert!(matches!(report.statuses["acquisition_plan"], ArtifactStatus::Generated { .. }));
    }
}

//! The Hybrid Extraction Engine: pre-structured fast path, quick regex, and
//! LLM-JSON, first successful stage wins but later-compatible stages merge
//! on top where they add fields the earlier stage didn't find.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial three-stage hybrid extractor.

/// A typed record extracted for one artifact type, plus bookkeeping
/// metadata about how it was produced.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExtractedRecord {
    pub fields: std::collections::BTreeMap<String, serde_json::Value>,
    pub metadata: ExtractionMetadata,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExtractionMetadata {
    /// Number of fields populated by each stage; always present even when
    /// a stage found nothing, per the "never omit" invariant.
    pub stage1_count: usize,
    pub stage2_count: usize,
    pub stage3_count: usize,
    pub stage3_attempted: bool,
    pub stage3_error: std::option::Option<String>,
}

/// A minimal view over a retrieval hit, decoupled from the evidence store's
/// `Chunk` type so the extractor can be exercised without a live store.
pub struct RetrievalHit {
    pub content: String,
    pub format: std::option::Option<String>,
}

const LLM_STAGE_TEXT_THRESHOLD: usize = 200;

/// Runs the three-stage hybrid extraction.
///
/// `completion` is optional: when absent, stage 3 is skipped as if it had
/// failed (stage 2's record is returned), matching the documented
/// failure-swallowing semantics.
pub async fn extract(
    hits: &[RetrievalHit],
    raw_text: &str,
    field_specs: &[crate::field::FieldSpec],
    completion: std::option::Option<&dyn crate::json_completion::JsonCompletionPort>,
) -> ExtractedRecord {
    // Stage 1: pre-structured fast path.
    for hit in hits {
        let looks_structured = matches!(hit.format.as_deref(), std::option::Option::Some("json"))
            || hit.format.as_deref().map(|f| f.starts_with("structured_")).unwrap_or(false);
        if looks_structured {
            if let std::result::Result::Ok(serde_json::Value::Object(map)) = serde_json::from_str(&hit.content) {
                let fields: std::collections::BTreeMap<String, serde_json::Value> = map.into_iter().collect();
                let stage1_count = fields.len();
                println!("[HybridExtractor] stage1 adopted pre-structured record with {stage1_count} fields");
                return ExtractedRecord {
                    fields,
                    metadata: ExtractionMetadata {
                        stage1_count,
                        stage2_count: 0,
                        stage3_count: 0,
                        stage3_attempted: false,
                        stage3_error: std::option::Option::None,
                    },
                };
            }
        }
    }

    // Stage 2: quick regex over raw_text.
    let mut stage2_fields: std::collections::BTreeMap<String, serde_json::Value> = std::collections::BTreeMap::new();
    for spec in field_specs {
        if let std::option::Option::Some((raw_value, _offset)) = spec.extract_first_match(raw_text) {
            if let std::option::Option::Some(normalized) = normalize_for_type(spec.field_type, &raw_value) {
                stage2_fields.insert(spec.name.clone(), normalized);
            }
        }
    }
    let stage2_count = stage2_fields.len();
    println!("[HybridExtractor] stage2 populated {stage2_count} fields via regex");

    // Stage 3: LLM-JSON, only if there's enough raw text and a completion
    // port was supplied.
    if raw_text.len() < LLM_STAGE_TEXT_THRESHOLD || completion.is_none() {
        return ExtractedRecord {
            fields: stage2_fields,
            metadata: ExtractionMetadata {
                stage1_count: 0,
                stage2_count,
                stage3_count: 0,
                stage3_attempted: false,
                stage3_error: std::option::Option::None,
            },
        };
    }

    let port = completion.unwrap();
    let prompt = build_schema_prompt(field_specs, raw_text);
    match port.complete_json(&prompt).await {
        std::result::Result::Ok(response) => match crate::json_completion::parse_first_balanced_object(&response) {
            std::option::Option::Some(serde_json::Value::Object(map)) => {
                let mut merged = stage2_fields.clone();
                let stage3_count = map.len();
                for (key, value) in map.into_iter() {
                    merged.insert(key, value);
                }
                ExtractedRecord {
                    fields: merged,
                    metadata: ExtractionMetadata {
                        stage1_count: 0,
                        stage2_count,
                        stage3_count,
                        stage3_attempted: true,
                        stage3_error: std::option::Option::None,
                    },
                }
            }
            _ => {
                println!("[HybridExtractor] stage3 response was not a JSON object, falling back to stage2");
                ExtractedRecord {
                    fields: stage2_fields,
                    metadata: ExtractionMetadata {
                        stage1_count: 0,
                        stage2_count,
                        stage3_count: 0,
                        stage3_attempted: true,
                        stage3_error: std::option::Option::Some(std::string::String::from("no balanced JSON object in response")),
                    },
                }
            }
        },
        std::result::Result::Err(error) => {
            println!("[HybridExtractor] stage3 failed: {error}");
            ExtractedRecord {
                fields: stage2_fields,
                metadata: ExtractionMetadata {
                    stage1_count: 0,
                    stage2_count,
                    stage3_count: 0,
                    stage3_attempted: true,
                    stage3_error: std::option::Option::Some(error),
                },
            }
        }
    }
}

fn normalize_for_type(field_type: crate::field::FieldType, raw: &str) -> std::option::Option<serde_json::Value> {
    use crate::field::FieldType;
    match field_type {
        FieldType::Currency | FieldType::Number | FieldType::Percentage => {
            crate::normalize::normalize_currency(raw).map(|v| serde_json::json!(v))
        }
        FieldType::Duration => crate::normalize::normalize_duration_months(raw).map(|v| serde_json::json!(v)),
        FieldType::Date => crate::normalize::normalize_date(raw).map(|d| serde_json::json!(d.to_string())),
        FieldType::Text | FieldType::Identifier | FieldType::Organization => {
            std::option::Option::Some(serde_json::json!(crate::normalize::normalize_text(raw)))
        }
    }
}

fn build_schema_prompt(field_specs: &[crate::field::FieldSpec], raw_text: &str) -> String {
    let field_names: std::vec::Vec<&str> = field_specs.iter().map(|spec| spec.name.as_str()).collect();
    std::format!(
        "Extract the following fields as a single JSON object with keys {:?}. Source text:\n{}",
        field_names, raw_text
    )
}

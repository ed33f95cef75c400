//! Deployment parameter schema validation

use std::fmt;

use serde_json::Value;

use super::entity::{DeploymentParams, ModelConfiguration, ModelRef};
use super::source::RawParams;

/// Wire keys recognized by the schema
pub const RECOGNIZED_KEYS: &[&str] = &[
    "env",
    "modelRegion",
    "modelIds",
    "imageGenerationModelIds",
    "videoGenerationModelIds",
    "ragEnabled",
    "ragKnowledgeBaseEnabled",
    "ragKnowledgeBaseAdvancedParsing",
    "ragKnowledgeBaseAdvancedParsingModelId",
    "agentEnabled",
    "searchAgentEnabled",
    "searchApiKey",
    "selfSignUpEnabled",
    "embeddingModelId",
    "rerankingModelId",
    "region",
    "endpointNames",
];

/// Region applied when the ambient source does not supply one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Embedding model applied when the ambient source does not supply one
pub const DEFAULT_EMBEDDING_MODEL_ID: &str = "amazon.titan-embed-text-v2:0";

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// Required field absent
    Missing { field: String },
    /// Value has the wrong type or shape
    Mistyped {
        field: String,
        expected: &'static str,
    },
    /// Non-empty string required
    Empty { field: String },
    /// Key not in the recognized set
    Unrecognized { field: String },
}

impl FieldIssue {
    /// The field path this issue points at (list issues carry the element
    /// index, e.g. `modelIds[2]`)
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field }
            | Self::Mistyped { field, .. }
            | Self::Empty { field }
            | Self::Unrecognized { field } => field,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "missing required field '{}'", field),
            Self::Mistyped { field, expected } => {
                write!(f, "field '{}' must be {}", field, expected)
            }
            Self::Empty { field } => {
                write!(f, "field '{}' must be a non-empty string", field)
            }
            Self::Unrecognized { field } => write!(f, "unrecognized field '{}'", field),
        }
    }
}

/// Raw or profile-overlaid input failed shape/type checks.
///
/// Carries every offending field, not just the first. Fatal: resolution
/// aborts with no default substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    issues: Vec<FieldIssue>,
}

impl SchemaValidationError {
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Whether any issue points at the given field (or an element of it)
    pub fn mentions(&self, field: &str) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.field() == field || issue.field().starts_with(&format!("{}[", field)))
    }
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema validation failed: ")?;
        for (position, issue) in self.issues.iter().enumerate() {
            if position > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaValidationError {}

/// Validate an arbitrary raw mapping into a typed parameter set.
///
/// Pure function: same input, same result, no side effects. Every
/// offending field is reported in the returned error, including keys
/// outside the recognized set.
pub fn validate_params(raw: &RawParams) -> Result<DeploymentParams, SchemaValidationError> {
    let mut checker = FieldChecker::new(raw);

    checker.reject_unrecognized();

    let params = DeploymentParams {
        env: checker.required_string("env"),
        model_region: checker.string_or("modelRegion", DEFAULT_REGION),
        model_ids: checker.model_ref_list("modelIds"),
        image_generation_model_ids: checker.model_ref_list("imageGenerationModelIds"),
        video_generation_model_ids: checker.model_ref_list("videoGenerationModelIds"),
        rag_enabled: checker.bool_or("ragEnabled", false),
        rag_knowledge_base_enabled: checker.bool_or("ragKnowledgeBaseEnabled", false),
        rag_knowledge_base_advanced_parsing: checker.bool_or("ragKnowledgeBaseAdvancedParsing", false),
        rag_knowledge_base_advanced_parsing_model_id: checker
            .optional_string("ragKnowledgeBaseAdvancedParsingModelId"),
        agent_enabled: checker.bool_or("agentEnabled", false),
        search_agent_enabled: checker.bool_or("searchAgentEnabled", false),
        search_api_key: checker.optional_string("searchApiKey"),
        self_sign_up_enabled: checker.bool_or("selfSignUpEnabled", true),
        embedding_model_id: checker.string_or("embeddingModelId", DEFAULT_EMBEDDING_MODEL_ID),
        reranking_model_id: checker.optional_string("rerankingModelId"),
        region: checker.string_or("region", DEFAULT_REGION),
        endpoint_names: checker.string_list("endpointNames"),
    };

    checker.finish(params)
}

/// Walks the raw mapping, accumulating issues while producing field
/// values. Values produced past the first issue are discarded by
/// [`FieldChecker::finish`], so extractors return placeholders on failure.
struct FieldChecker<'a> {
    raw: &'a RawParams,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldChecker<'a> {
    fn new(raw: &'a RawParams) -> Self {
        Self {
            raw,
            issues: Vec::new(),
        }
    }

    fn finish(self, params: DeploymentParams) -> Result<DeploymentParams, SchemaValidationError> {
        if self.issues.is_empty() {
            Ok(params)
        } else {
            Err(SchemaValidationError {
                issues: self.issues,
            })
        }
    }

    fn push(&mut self, issue: FieldIssue) {
        self.issues.push(issue);
    }

    fn value(&self, key: &str) -> Option<&'a Value> {
        self.raw.get(key)
    }

    fn reject_unrecognized(&mut self) {
        let raw = self.raw;
        for key in raw.keys() {
            if !RECOGNIZED_KEYS.contains(&key.as_str()) {
                self.push(FieldIssue::Unrecognized { field: key.clone() });
            }
        }
    }

    /// Required non-empty string, no default
    fn required_string(&mut self, key: &str) -> String {
        match self.value(key) {
            None => {
                self.push(FieldIssue::Missing {
                    field: key.to_string(),
                });
                String::new()
            }
            Some(value) => self.non_empty_string(key, value),
        }
    }

    /// Non-empty string falling back to a schema default when absent
    fn string_or(&mut self, key: &str, default: &str) -> String {
        match self.value(key) {
            None => default.to_string(),
            Some(value) => self.non_empty_string(key, value),
        }
    }

    fn non_empty_string(&mut self, key: &str, value: &Value) -> String {
        match value {
            Value::String(text) if !text.is_empty() => text.clone(),
            Value::String(_) => {
                self.push(FieldIssue::Empty {
                    field: key.to_string(),
                });
                String::new()
            }
            _ => {
                self.push(FieldIssue::Mistyped {
                    field: key.to_string(),
                    expected: "a string",
                });
                String::new()
            }
        }
    }

    /// Optional string; absent or explicit null both mean "not set"
    fn optional_string(&mut self, key: &str) -> Option<String> {
        match self.value(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(_) => {
                self.push(FieldIssue::Mistyped {
                    field: key.to_string(),
                    expected: "a string",
                });
                None
            }
        }
    }

    /// Strict boolean falling back to a schema default when absent
    fn bool_or(&mut self, key: &str, default: bool) -> bool {
        match self.value(key) {
            None => default,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => {
                self.push(FieldIssue::Mistyped {
                    field: key.to_string(),
                    expected: "a boolean",
                });
                default
            }
        }
    }

    /// Sequence of strings, empty when absent
    fn string_list(&mut self, key: &str) -> Vec<String> {
        let Some(value) = self.value(key) else {
            return Vec::new();
        };
        let Value::Array(elements) = value else {
            self.push(FieldIssue::Mistyped {
                field: key.to_string(),
                expected: "a sequence of strings",
            });
            return Vec::new();
        };

        let mut names = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            match element {
                Value::String(name) => names.push(name.clone()),
                _ => self.push(FieldIssue::Mistyped {
                    field: format!("{}[{}]", key, index),
                    expected: "a string",
                }),
            }
        }
        names
    }

    /// Sequence of model references, empty when absent. Each element is
    /// either a bare identifier string or a `{modelId, region}` record.
    fn model_ref_list(&mut self, key: &str) -> Vec<ModelRef> {
        let Some(value) = self.value(key) else {
            return Vec::new();
        };
        let Value::Array(elements) = value else {
            self.push(FieldIssue::Mistyped {
                field: key.to_string(),
                expected: "a sequence of model references",
            });
            return Vec::new();
        };

        let mut references = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            if let Some(reference) = self.model_ref(key, index, element) {
                references.push(reference);
            }
        }
        references
    }

    fn model_ref(&mut self, key: &str, index: usize, element: &Value) -> Option<ModelRef> {
        match element {
            Value::String(model_id) if !model_id.is_empty() => {
                Some(ModelRef::Id(model_id.clone()))
            }
            Value::String(_) => {
                self.push(FieldIssue::Empty {
                    field: format!("{}[{}]", key, index),
                });
                None
            }
            Value::Object(_) => {
                match serde_json::from_value::<ModelConfiguration>(element.clone()) {
                    Ok(configuration) => {
                        let mut valid = true;
                        if configuration.model_id.is_empty() {
                            self.push(FieldIssue::Empty {
                                field: format!("{}[{}].modelId", key, index),
                            });
                            valid = false;
                        }
                        if configuration.region.is_empty() {
                            self.push(FieldIssue::Empty {
                                field: format!("{}[{}].region", key, index),
                            });
                            valid = false;
                        }
                        valid.then(|| ModelRef::Configured(configuration))
                    }
                    Err(_) => {
                        self.push(FieldIssue::Mistyped {
                            field: format!("{}[{}]", key, index),
                            expected: "a model id or a {modelId, region} record",
                        });
                        None
                    }
                }
            }
            _ => {
                self.push(FieldIssue::Mistyped {
                    field: format!("{}[{}]", key, index),
                    expected: "a model id or a {modelId, region} record",
                });
                None
            }
        }
    }
}

//! Static environment profile registry

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use super::source::RawParams;

/// A named, partial parameter overlay.
///
/// Only overridden fields need be present. Profiles are hand-authored and
/// may drift out of schema, so the resolver re-validates the overlay
/// before using it.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentProfile {
    fields: RawParams,
}

impl EnvironmentProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: RawParams) -> Self {
        Self { fields }
    }

    /// Set one overlay field
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn fields(&self) -> &RawParams {
        &self.fields
    }

    /// The mapping handed back to the schema: every profile field, with the
    /// environment name always taken from the dynamic input. A profile can
    /// never rename the environment it describes.
    pub fn overlay(&self, env: &str) -> RawParams {
        let mut merged = self.fields.clone();
        merged.insert("env".to_string(), Value::String(env.to_string()));
        merged
    }
}

/// Immutable mapping from environment name to profile, constructed once.
///
/// Part of the deployable artifact: the built-in table is hand-edited
/// source code, not runtime input.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    entries: HashMap<String, EnvironmentProfile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile under an environment name
    pub fn with_profile(mut self, name: impl Into<String>, profile: EnvironmentProfile) -> Self {
        self.entries.insert(name.into(), profile);
        self
    }

    /// Lookup by environment name. Absence is a normal control-flow
    /// branch, never an error.
    pub fn get(&self, name: &str) -> Option<&EnvironmentProfile> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered environment names, sorted for stable listing
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registry shipped with this artifact
    pub fn builtin() -> &'static ProfileRegistry {
        &BUILTIN
    }
}

static BUILTIN: Lazy<ProfileRegistry> = Lazy::new(builtin_profiles);

fn builtin_profiles() -> ProfileRegistry {
    ProfileRegistry::new().with_profile("dev", dev_profile())
}

fn dev_profile() -> EnvironmentProfile {
    let fields = json!({
        "modelRegion": "ap-northeast-1",
        "modelIds": [
            "apac.anthropic.claude-3-5-sonnet-20241022-v2:0",
            "apac.anthropic.claude-3-haiku-20240307-v1:0",
        ],
        "imageGenerationModelIds": ["amazon.nova-canvas-v1:0"],
        "videoGenerationModelIds": ["amazon.nova-reel-v1:0"],
        "ragEnabled": false,
        "ragKnowledgeBaseEnabled": true,
        "ragKnowledgeBaseAdvancedParsing": true,
        "ragKnowledgeBaseAdvancedParsingModelId": "anthropic.claude-3-haiku-20240307-v1:0",
        "agentEnabled": false,
        "searchAgentEnabled": false,
        "searchApiKey": "",
        "selfSignUpEnabled": false,
        "embeddingModelId": "amazon.titan-embed-text-v2:0",
        "rerankingModelId": "amazon.rerank-v1:0",
        "region": "ap-northeast-1",
        "endpointNames": [],
    });

    let Value::Object(fields) = fields else {
        return EnvironmentProfile::new();
    };
    EnvironmentProfile::from_fields(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_has_dev() {
        let registry = ProfileRegistry::builtin();

        assert!(registry.contains("dev"));
        assert_eq!(registry.names(), vec!["dev"]);
    }

    #[test]
    fn test_unknown_environment_returns_none() {
        assert!(ProfileRegistry::builtin().get("production").is_none());
    }

    #[test]
    fn test_overlay_always_carries_the_dynamic_env_name() {
        let profile = EnvironmentProfile::new()
            .with_field("env", serde_json::json!("renamed"))
            .with_field("modelRegion", serde_json::json!("eu-west-1"));

        let overlay = profile.overlay("dev");

        assert_eq!(overlay.get("env"), Some(&serde_json::json!("dev")));
        assert_eq!(
            overlay.get("modelRegion"),
            Some(&serde_json::json!("eu-west-1"))
        );
    }

    #[test]
    fn test_dev_profile_overlay_validates() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("dev").unwrap();

        let params = super::super::validation::validate_params(&profile.overlay("dev")).unwrap();

        assert_eq!(params.env, "dev");
        assert_eq!(params.model_region, "ap-northeast-1");
        assert_eq!(params.model_ids.len(), 2);
        assert!(params.rag_knowledge_base_enabled);
        assert!(!params.self_sign_up_enabled);
        assert_eq!(
            params.reranking_model_id.as_deref(),
            Some("amazon.rerank-v1:0")
        );
    }

    #[test]
    fn test_registry_builder() {
        let registry = ProfileRegistry::new()
            .with_profile("staging", EnvironmentProfile::new())
            .with_profile("prod", EnvironmentProfile::new());

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["prod", "staging"]);
    }
}

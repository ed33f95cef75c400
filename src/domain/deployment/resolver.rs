//! Parameter resolution pipeline

use tracing::debug;

use super::entity::ResolvedDeploymentParams;
use super::normalize::canonicalize;
use super::profiles::ProfileRegistry;
use super::source::ParamSource;
use super::validation::validate_params;
use crate::domain::error::ResolveError;

/// Orchestrates one resolution: read the ambient source once, validate,
/// apply profile precedence, canonicalize.
///
/// Precedence after a profile hit is a full override: profile field >
/// schema default > validation failure. The raw input's non-environment
/// fields are never consulted once a profile matched.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a ProfileRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a ProfileRegistry) -> Self {
        Self { registry }
    }

    /// Run the pipeline. All-or-nothing: any validation failure aborts
    /// with the full issue list and no partial result.
    pub fn resolve(
        &self,
        source: &dyn ParamSource,
    ) -> Result<ResolvedDeploymentParams, ResolveError> {
        let raw = source.read()?;
        let params = validate_params(&raw)?;

        let params = match self.registry.get(&params.env) {
            Some(profile) => {
                debug!(env = %params.env, "environment profile found, overriding ambient input");
                validate_params(&profile.overlay(&params.env))?
            }
            None => {
                debug!(env = %params.env, "no environment profile registered, using ambient input");
                params
            }
        };

        debug!(
            env = %params.env,
            model_ids = params.model_ids.len(),
            image_generation_model_ids = params.image_generation_model_ids.len(),
            video_generation_model_ids = params.video_generation_model_ids.len(),
            "parameters validated"
        );

        Ok(canonicalize(params))
    }
}

impl Resolver<'static> {
    /// Resolver over the built-in profile table
    pub fn builtin() -> Self {
        Self {
            registry: ProfileRegistry::builtin(),
        }
    }
}

/// Resolve against the built-in profile registry
pub fn resolve(source: &dyn ParamSource) -> Result<ResolvedDeploymentParams, ResolveError> {
    Resolver::builtin().resolve(source)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::super::entity::ModelConfiguration;
    use super::super::profiles::EnvironmentProfile;
    use super::super::source::{MockParamSource, RawParams, SourceError};
    use super::*;

    fn raw(value: Value) -> RawParams {
        match value {
            Value::Object(map) => map,
            _ => panic!("test input must be an object"),
        }
    }

    fn source_returning(value: Value) -> MockParamSource {
        let params = raw(value);
        let mut source = MockParamSource::new();
        source
            .expect_read()
            .times(1)
            .returning(move || Ok(params.clone()));
        source
    }

    #[test]
    fn test_no_profile_match_equals_validate_then_normalize() {
        let input = json!({
            "env": "unregistered",
            "modelRegion": "eu-central-1",
            "modelIds": ["m1", {"modelId": "m2", "region": "r2"}],
        });

        let registry = ProfileRegistry::new();
        let resolved = Resolver::new(&registry)
            .resolve(&source_returning(input.clone()))
            .unwrap();

        let expected = canonicalize(validate_params(&raw(input)).unwrap());
        assert_eq!(resolved, expected);
        assert_eq!(
            resolved.model_ids,
            vec![
                ModelConfiguration::new("m1", "eu-central-1"),
                ModelConfiguration::new("m2", "r2"),
            ]
        );
    }

    #[test]
    fn test_profile_fully_overrides_ambient_fields() {
        let registry = ProfileRegistry::new().with_profile(
            "staging",
            EnvironmentProfile::new()
                .with_field("modelRegion", json!("ap-northeast-1"))
                .with_field("modelIds", json!(["profile-model"]))
                .with_field("ragEnabled", json!(true)),
        );

        // Ambient input disagrees on every overridden field and supplies
        // extras the profile omits.
        let source = source_returning(json!({
            "env": "staging",
            "modelRegion": "us-west-2",
            "modelIds": ["ambient-model-a", "ambient-model-b"],
            "agentEnabled": true,
        }));

        let resolved = Resolver::new(&registry).resolve(&source).unwrap();

        assert_eq!(resolved.env, "staging");
        assert_eq!(resolved.model_region, "ap-northeast-1");
        assert_eq!(
            resolved.model_ids,
            vec![ModelConfiguration::new("profile-model", "ap-northeast-1")]
        );
        assert!(resolved.rag_enabled);
        // Full override: the ambient agentEnabled is not merged in; the
        // field falls back to its schema default.
        assert!(!resolved.agent_enabled);
    }

    #[test]
    fn test_profile_cannot_rename_the_environment() {
        let registry = ProfileRegistry::new().with_profile(
            "staging",
            EnvironmentProfile::new().with_field("env", json!("prod")),
        );

        let resolved = Resolver::new(&registry)
            .resolve(&source_returning(json!({"env": "staging"})))
            .unwrap();

        assert_eq!(resolved.env, "staging");
    }

    #[test]
    fn test_drifted_profile_fails_at_revalidation() {
        let registry = ProfileRegistry::new().with_profile(
            "staging",
            EnvironmentProfile::new().with_field("ragEnabled", json!("yes")),
        );

        let error = Resolver::new(&registry)
            .resolve(&source_returning(json!({"env": "staging"})))
            .unwrap_err();

        match error {
            ResolveError::Schema(schema) => assert!(schema.mentions("ragEnabled")),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_raw_input_aborts_before_profile_lookup() {
        let error = Resolver::builtin()
            .resolve(&source_returning(json!({"modelRegion": "us-east-1"})))
            .unwrap_err();

        match error {
            ResolveError::Schema(schema) => assert!(schema.mentions("env")),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_source_errors_propagate() {
        let mut source = MockParamSource::new();
        source
            .expect_read()
            .times(1)
            .returning(|| Err(SourceError::NotAMapping));

        let error = Resolver::builtin().resolve(&source).unwrap_err();
        assert!(matches!(error, ResolveError::Source(_)));
    }

    #[test]
    fn test_builtin_dev_profile_end_to_end() {
        // Ambient input picked dev but disagrees with the profile table;
        // the table wins wholesale.
        let source = source_returning(json!({
            "env": "dev",
            "modelRegion": "us-east-1",
            "modelIds": ["ambient-only-model"],
            "selfSignUpEnabled": true,
        }));

        let resolved = resolve(&source).unwrap();

        assert_eq!(resolved.env, "dev");
        assert_eq!(resolved.model_region, "ap-northeast-1");
        assert_eq!(
            resolved.model_ids,
            vec![
                ModelConfiguration::new(
                    "apac.anthropic.claude-3-5-sonnet-20241022-v2:0",
                    "ap-northeast-1"
                ),
                ModelConfiguration::new(
                    "apac.anthropic.claude-3-haiku-20240307-v1:0",
                    "ap-northeast-1"
                ),
            ]
        );
        assert_eq!(
            resolved.image_generation_model_ids,
            vec![ModelConfiguration::new(
                "amazon.nova-canvas-v1:0",
                "ap-northeast-1"
            )]
        );
        assert!(resolved.rag_knowledge_base_enabled);
        assert!(!resolved.self_sign_up_enabled);
        assert!(resolved.endpoint_names.is_empty());
    }
}

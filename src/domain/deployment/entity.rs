//! Deployment parameter entities

use serde::{Deserialize, Serialize};

/// A model reference as supplied by the ambient source.
///
/// The wire format accepts either a bare identifier string or the
/// structured `{modelId, region}` record. Normalization turns every
/// element into [`ModelConfiguration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelRef {
    /// Bare identifier shorthand; the deployment's model region applies
    Id(String),
    /// Structured reference carrying its own region
    Configured(ModelConfiguration),
}

/// Canonical model reference - an identifier plus the region it is invoked in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelConfiguration {
    pub model_id: String,
    pub region: String,
}

impl ModelConfiguration {
    pub fn new(model_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            region: region.into(),
        }
    }
}

/// Validated deployment parameter set.
///
/// Every field is present and type-correct once this exists; the three
/// model lists still carry both reference shapes until normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentParams {
    pub env: String,
    pub model_region: String,
    pub model_ids: Vec<ModelRef>,
    pub image_generation_model_ids: Vec<ModelRef>,
    pub video_generation_model_ids: Vec<ModelRef>,
    pub rag_enabled: bool,
    pub rag_knowledge_base_enabled: bool,
    pub rag_knowledge_base_advanced_parsing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_knowledge_base_advanced_parsing_model_id: Option<String>,
    pub agent_enabled: bool,
    pub search_agent_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_api_key: Option<String>,
    pub self_sign_up_enabled: bool,
    pub embedding_model_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reranking_model_id: Option<String>,
    pub region: String,
    pub endpoint_names: Vec<String>,
}

/// Resolved deployment parameter set - the sole artifact handed to
/// infrastructure-construction collaborators.
///
/// Identical to [`DeploymentParams`] except every model list holds the
/// canonical [`ModelConfiguration`] form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDeploymentParams {
    pub env: String,
    pub model_region: String,
    pub model_ids: Vec<ModelConfiguration>,
    pub image_generation_model_ids: Vec<ModelConfiguration>,
    pub video_generation_model_ids: Vec<ModelConfiguration>,
    pub rag_enabled: bool,
    pub rag_knowledge_base_enabled: bool,
    pub rag_knowledge_base_advanced_parsing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_knowledge_base_advanced_parsing_model_id: Option<String>,
    pub agent_enabled: bool,
    pub search_agent_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_api_key: Option<String>,
    pub self_sign_up_enabled: bool,
    pub embedding_model_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reranking_model_id: Option<String>,
    pub region: String,
    pub endpoint_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ref_deserializes_bare_id() {
        let reference: ModelRef = serde_json::from_str(r#""amazon.nova-canvas-v1:0""#).unwrap();
        assert_eq!(reference, ModelRef::Id("amazon.nova-canvas-v1:0".to_string()));
    }

    #[test]
    fn test_model_ref_deserializes_structured_form() {
        let reference: ModelRef =
            serde_json::from_str(r#"{"modelId": "amazon.nova-reel-v1:0", "region": "us-west-2"}"#)
                .unwrap();
        assert_eq!(
            reference,
            ModelRef::Configured(ModelConfiguration::new("amazon.nova-reel-v1:0", "us-west-2"))
        );
    }

    #[test]
    fn test_model_ref_rejects_unknown_record_fields() {
        let result: Result<ModelRef, _> =
            serde_json::from_str(r#"{"modelId": "m", "region": "r", "regon": "typo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_model_configuration_serializes_camel_case() {
        let configuration = ModelConfiguration::new("amazon.titan-embed-text-v2:0", "us-east-1");
        let json = serde_json::to_string(&configuration).unwrap();
        assert!(json.contains("\"modelId\""));
        assert!(json.contains("\"region\""));
    }

    #[test]
    fn test_resolved_params_use_wire_key_names() {
        let params = ResolvedDeploymentParams {
            env: "dev".to_string(),
            model_region: "us-east-1".to_string(),
            model_ids: vec![],
            image_generation_model_ids: vec![],
            video_generation_model_ids: vec![],
            rag_enabled: false,
            rag_knowledge_base_enabled: false,
            rag_knowledge_base_advanced_parsing: false,
            rag_knowledge_base_advanced_parsing_model_id: None,
            agent_enabled: false,
            search_agent_enabled: false,
            search_api_key: None,
            self_sign_up_enabled: true,
            embedding_model_id: "amazon.titan-embed-text-v2:0".to_string(),
            reranking_model_id: None,
            region: "us-east-1".to_string(),
            endpoint_names: vec![],
        };

        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"modelRegion\""));
        assert!(json.contains("\"imageGenerationModelIds\""));
        assert!(json.contains("\"selfSignUpEnabled\""));
        assert!(!json.contains("\"rerankingModelId\""));
    }
}

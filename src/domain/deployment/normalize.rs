//! Model reference canonicalization

use super::entity::{DeploymentParams, ModelConfiguration, ModelRef, ResolvedDeploymentParams};

/// Convert a model reference list into the canonical structured form.
///
/// Bare identifiers pick up the default region; structured references pass
/// through unchanged, including a region that differs from the default.
/// Order and duplicates are preserved - the list is an ordered preference
/// list, not a set. Empty in, empty out.
pub fn canonicalize_model_refs(
    references: Vec<ModelRef>,
    default_region: &str,
) -> Vec<ModelConfiguration> {
    references
        .into_iter()
        .map(|reference| match reference {
            ModelRef::Id(model_id) => ModelConfiguration::new(model_id, default_region),
            ModelRef::Configured(configuration) => configuration,
        })
        .collect()
}

/// Canonicalize every model list in a validated parameter set, using the
/// set's model region as the default for bare identifiers.
pub fn canonicalize(params: DeploymentParams) -> ResolvedDeploymentParams {
    let default_region = params.model_region.clone();

    ResolvedDeploymentParams {
        env: params.env,
        model_ids: canonicalize_model_refs(params.model_ids, &default_region),
        image_generation_model_ids: canonicalize_model_refs(
            params.image_generation_model_ids,
            &default_region,
        ),
        video_generation_model_ids: canonicalize_model_refs(
            params.video_generation_model_ids,
            &default_region,
        ),
        model_region: params.model_region,
        rag_enabled: params.rag_enabled,
        rag_knowledge_base_enabled: params.rag_knowledge_base_enabled,
        rag_knowledge_base_advanced_parsing: params.rag_knowledge_base_advanced_parsing,
        rag_knowledge_base_advanced_parsing_model_id: params
            .rag_knowledge_base_advanced_parsing_model_id,
        agent_enabled: params.agent_enabled,
        search_agent_enabled: params.search_agent_enabled,
        search_api_key: params.search_api_key,
        self_sign_up_enabled: params.self_sign_up_enabled,
        embedding_model_id: params.embedding_model_id,
        reranking_model_id: params.reranking_model_id,
        region: params.region,
        endpoint_names: params.endpoint_names,
    }
}

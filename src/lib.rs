//! GenAI Stack Config
//!
//! Deployment parameter resolution for the GenAI stack with support for:
//! - Ambient key-value input (parameters file + environment variables)
//! - Schema validation producing a typed parameter set or a full issue list
//! - Static environment profiles that fully override ambient input
//! - Model reference normalization into one canonical shape

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    canonicalize, canonicalize_model_refs, resolve, validate_params, DeploymentParams,
    EnvironmentProfile, FieldIssue, ModelConfiguration, ModelRef, ParamSource, ProfileRegistry,
    RawParams, ResolveError, ResolvedDeploymentParams, Resolver, SchemaValidationError,
    SourceError,
};

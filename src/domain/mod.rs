//! Domain layer - Parameter resolution logic and entities

pub mod deployment;
pub mod error;

pub use deployment::{
    canonicalize, canonicalize_model_refs, resolve, validate_params, DeploymentParams,
    EnvironmentProfile, FieldIssue, ModelConfiguration, ModelRef, ParamSource, ProfileRegistry,
    RawParams, ResolvedDeploymentParams, Resolver, SchemaValidationError, SourceError,
    RECOGNIZED_KEYS,
};
pub use error::ResolveError;

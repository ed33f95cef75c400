//! Parameter source implementations
//!
//! The ambient channel for deployment parameters is a layered read: an
//! optional parameters file underneath prefixed environment variables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::domain::{ParamSource, RawParams, SourceError, RECOGNIZED_KEYS};

/// Wire keys carrying sequences, parsed from comma-separated environment values
const LIST_KEYS: &[&str] = &[
    "modelIds",
    "imageGenerationModelIds",
    "videoGenerationModelIds",
    "endpointNames",
];

/// Lowercased key -> canonical wire key.
///
/// The config crate folds keys to lowercase on the way in; recognized keys
/// are restored to their wire casing so the schema sees exact names.
/// Unrecognized keys pass through untouched for the schema to reject.
/// `modelId` is included because it appears nested inside model reference
/// records.
static CANONICAL_KEYS: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    RECOGNIZED_KEYS
        .iter()
        .chain(&["modelId"])
        .map(|key| (key.to_ascii_lowercase(), *key))
        .collect()
});

/// Reads the raw mapping from an optional parameters file (JSON, TOML or
/// YAML) layered under prefixed environment variables. Environment
/// variables win over file values.
#[derive(Debug, Clone)]
pub struct LayeredParamSource {
    file: Option<PathBuf>,
    env_prefix: String,
}

impl LayeredParamSource {
    pub fn new(env_prefix: impl Into<String>) -> Self {
        Self {
            file: None,
            env_prefix: env_prefix.into(),
        }
    }

    /// Layer a parameters file underneath the environment variables
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    fn build(&self) -> Result<config::Config, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = &self.file {
            builder = builder.add_source(config::File::from(path.as_path()));
        }

        let mut environment = config::Environment::with_prefix(&self.env_prefix)
            .separator("__")
            .try_parsing(true)
            .list_separator(",");
        for key in LIST_KEYS {
            environment = environment.with_list_parse_key(&key.to_ascii_lowercase());
        }

        builder.add_source(environment).build()
    }
}

impl ParamSource for LayeredParamSource {
    fn read(&self) -> Result<RawParams, SourceError> {
        let config = self
            .build()
            .map_err(|error| SourceError::read(error.to_string()))?;
        let document: Value = config
            .try_deserialize()
            .map_err(|error| SourceError::read(error.to_string()))?;

        let Value::Object(map) = canonicalize_value(document) else {
            return Err(SourceError::NotAMapping);
        };
        Ok(map)
    }
}

/// Restore recognized keys to their canonical wire casing, at every
/// nesting level.
fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (canonical_key(&key), canonicalize_value(value)))
                .collect(),
        ),
        Value::Array(elements) => {
            Value::Array(elements.into_iter().map(canonicalize_value).collect())
        }
        other => other,
    }
}

fn canonical_key(key: &str) -> String {
    match CANONICAL_KEYS.get(key.to_ascii_lowercase().as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => key.to_string(),
    }
}

/// Fixed in-memory mapping, for library consumers and tests
#[derive(Debug, Clone, Default)]
pub struct StaticParamSource {
    params: RawParams,
}

impl StaticParamSource {
    pub fn new(params: RawParams) -> Self {
        Self { params }
    }

    /// Build from a JSON value; the root must be an object
    pub fn from_value(value: Value) -> Result<Self, SourceError> {
        match value {
            Value::Object(params) => Ok(Self { params }),
            _ => Err(SourceError::NotAMapping),
        }
    }
}

impl ParamSource for StaticParamSource {
    fn read(&self) -> Result<RawParams, SourceError> {
        Ok(self.params.clone())
    }
}

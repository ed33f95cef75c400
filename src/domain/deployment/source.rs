//! Parameter source boundary

use serde_json::{Map, Value};
use thiserror::Error;

/// Untyped key-value mapping as supplied by the ambient source.
///
/// No invariants; may be incomplete or malformed. Created once per
/// resolution and discarded after validation.
pub type RawParams = Map<String, Value>;

/// Errors raised by a parameter source
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The underlying channel could not be read
    #[error("failed to read parameter source: {message}")]
    Read { message: String },

    /// The source document's root is not a key-value mapping
    #[error("parameter source root must be a key-value mapping")]
    NotAMapping,
}

impl SourceError {
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }
}

/// Supplies the raw parameter mapping for one resolution.
///
/// Implementations live in the infrastructure layer. The resolver reads
/// the source exactly once per resolution.
#[cfg_attr(test, mockall::automock)]
pub trait ParamSource {
    fn read(&self) -> Result<RawParams, SourceError>;
}

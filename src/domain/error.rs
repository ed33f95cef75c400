use thiserror::Error;

use crate::domain::deployment::{SchemaValidationError, SourceError};

/// Errors surfaced by the resolution pipeline
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The ambient source could not produce a raw mapping
    #[error("parameter source error: {0}")]
    Source(#[from] SourceError),

    /// Raw or profile-overlaid input failed schema validation
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let error = ResolveError::from(SourceError::read("no such file"));
        assert_eq!(
            error.to_string(),
            "parameter source error: failed to read parameter source: no such file"
        );
    }
}

use greeting_artifacts_core::artifact::ArtifactKind;
use greeting_artifacts_core::error::{GenerationError, ValidationError};
use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can end a greeting invocation without a 200.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Misconfiguration(#[from] ConfigError),

    #[error("failed to generate {kind}: {source}")]
    Generation {
        kind: ArtifactKind,
        #[source]
        source: GenerationError,
    },

    #[error("failed to upload '{key}' to bucket '{bucket}': {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Misconfiguration(_) | Self::Generation { .. } => 500,
            Self::Upload { .. } => 502,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Misconfiguration(_) => "misconfiguration",
            Self::Generation { .. } => "generation_failed",
            Self::Upload { .. } => "upload_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_taxonomy() {
        let missing = HandlerError::from(ValidationError::MissingField("first_name"));
        assert_eq!(missing.status_code(), 400);
        assert_eq!(missing.error_code(), "validation_error");

        let misconfigured = HandlerError::from(ConfigError::MissingBucket);
        assert_eq!(misconfigured.status_code(), 500);

        let generation = HandlerError::Generation {
            kind: ArtifactKind::Document,
            source: GenerationError::Rejected("font unavailable".to_string()),
        };
        assert_eq!(generation.status_code(), 500);
        assert_eq!(
            generation.to_string(),
            "failed to generate document: font unavailable"
        );

        let upload = HandlerError::Upload {
            bucket: "artifacts".to_string(),
            key: "test.pdf".to_string(),
            message: "access denied".to_string(),
        };
        assert_eq!(upload.status_code(), 502);
        assert_eq!(upload.error_code(), "upload_failed");
    }
}

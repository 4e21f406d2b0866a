use thiserror::Error;

use crate::artifact::ArtifactKind;

/// Rejection of an inbound greeting request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Field '{field}' must be a {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{0}")]
    MalformedPayload(String),
}

/// Failure inside one of the artifact engines.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("spreadsheet engine error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("document engine error: {0}")]
    Document(#[from] printpdf::Error),

    #[error("{kind} generator produced an empty buffer")]
    EmptyArtifact { kind: ArtifactKind },

    #[error("document font cannot encode character '{character}'")]
    UnsupportedCharacter { character: char },

    #[error("{0}")]
    Rejected(String),
}

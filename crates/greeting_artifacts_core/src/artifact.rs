use std::fmt;

use crate::error::GenerationError;

pub const ARTIFACT_FILE_STEM: &str = "test";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Spreadsheet,
    Document,
}

impl ArtifactKind {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Spreadsheet => "xlsx",
            Self::Document => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Self::Document => "application/pdf",
        }
    }

    pub fn default_file_name(self) -> String {
        format!("{ARTIFACT_FILE_STEM}.{}", self.extension())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Spreadsheet => "spreadsheet",
            Self::Document => "document",
        })
    }
}

/// A rendered artifact held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl GeneratedArtifact {
    pub fn new(kind: ArtifactKind, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            file_name: kind.default_file_name(),
            bytes,
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Refuses an artifact whose buffer is empty; nothing empty is uploaded.
    pub fn ensure_non_empty(self) -> Result<Self, GenerationError> {
        if self.is_empty() {
            return Err(GenerationError::EmptyArtifact { kind: self.kind });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_names_match_legacy_keys() {
        assert_eq!(ArtifactKind::Spreadsheet.default_file_name(), "test.xlsx");
        assert_eq!(ArtifactKind::Document.default_file_name(), "test.pdf");
    }

    #[test]
    fn artifact_reports_content_type_of_its_kind() {
        let artifact = GeneratedArtifact::new(ArtifactKind::Document, b"%PDF".to_vec());
        assert_eq!(artifact.content_type(), "application/pdf");
        assert_eq!(artifact.len(), 4);
        assert!(!artifact.is_empty());
    }

    #[test]
    fn empty_artifact_is_refused() {
        let error = GeneratedArtifact::new(ArtifactKind::Spreadsheet, Vec::new())
            .ensure_non_empty()
            .expect_err("empty buffer should be refused");
        assert!(matches!(
            error,
            GenerationError::EmptyArtifact {
                kind: ArtifactKind::Spreadsheet
            }
        ));
        assert_eq!(error.to_string(), "spreadsheet generator produced an empty buffer");

        let kept = GeneratedArtifact::new(ArtifactKind::Document, b"%PDF".to_vec())
            .ensure_non_empty()
            .expect("non-empty buffer should pass");
        assert_eq!(kept.len(), 4);
    }
}

use greeting_artifacts_core::artifact::{ArtifactKind, GeneratedArtifact};
use greeting_artifacts_core::contract::GreetingRequest;
use greeting_artifacts_core::document::{render_document, DocumentContent, DocumentLayout};
use greeting_artifacts_core::error::GenerationError;
use greeting_artifacts_core::spreadsheet::SpreadsheetTemplate;

use crate::handlers::greeting::{DocumentGenerator, SpreadsheetGenerator};

#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxSpreadsheetGenerator {
    pub template: SpreadsheetTemplate,
}

impl SpreadsheetGenerator for XlsxSpreadsheetGenerator {
    fn generate_spreadsheet(
        &self,
        _request: &GreetingRequest,
    ) -> Result<GeneratedArtifact, GenerationError> {
        Ok(GeneratedArtifact::new(
            ArtifactKind::Spreadsheet,
            self.template.render()?,
        ))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfDocumentGenerator {
    pub content: DocumentContent,
}

impl PdfDocumentGenerator {
    pub fn layout_for(&self, request: &GreetingRequest) -> DocumentLayout {
        DocumentLayout::single_line(self.content.line_text(&request.greeting()))
    }
}

impl DocumentGenerator for PdfDocumentGenerator {
    fn generate_document(
        &self,
        request: &GreetingRequest,
    ) -> Result<GeneratedArtifact, GenerationError> {
        Ok(GeneratedArtifact::new(
            ArtifactKind::Document,
            render_document(&self.layout_for(request))?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreadsheet_output_does_not_depend_on_request() {
        let generator = XlsxSpreadsheetGenerator::default();
        let jane = generator
            .generate_spreadsheet(&GreetingRequest::new("Jane", "Doe"))
            .expect("spreadsheet should render");
        let john = generator
            .generate_spreadsheet(&GreetingRequest::new("John", "Roe"))
            .expect("spreadsheet should render");

        assert_eq!(jane.file_name, "test.xlsx");
        assert_eq!(jane.bytes, john.bytes);
    }

    #[test]
    fn greeting_document_layout_carries_request_greeting() {
        let generator = PdfDocumentGenerator::default();
        let layout = generator.layout_for(&GreetingRequest::new("Jane", "Doe"));
        assert_eq!(layout.text, "Hello Jane Doe!");
    }

    #[test]
    fn static_document_layout_ignores_request() {
        let generator = PdfDocumentGenerator {
            content: DocumentContent::Static,
        };
        let layout = generator.layout_for(&GreetingRequest::new("Jane", "Doe"));
        assert_eq!(layout.text, "Hello");
    }

    #[test]
    fn document_artifact_is_named_and_non_empty() {
        let artifact = PdfDocumentGenerator::default()
            .generate_document(&GreetingRequest::new("Jane", "Doe"))
            .expect("document should render");

        assert_eq!(artifact.file_name, "test.pdf");
        assert_eq!(artifact.content_type(), "application/pdf");
        assert!(!artifact.is_empty());
    }

    #[test]
    fn non_latin_greeting_fails_document_generation() {
        let error = PdfDocumentGenerator::default()
            .generate_document(&GreetingRequest::new("李", "Wang"))
            .expect_err("document font cannot carry the name");
        assert!(matches!(
            error,
            GenerationError::UnsupportedCharacter { character: '李' }
        ));
    }
}

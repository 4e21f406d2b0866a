//! Single-page greeting document and its PDF rendering.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::GenerationError;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;
pub const FONT_SIZE_PT: f32 = 13.0;
pub const CELL_HEIGHT_MM: f32 = 5.0;
pub const CELL_MARGIN_MM: f32 = 1.0;
pub const STATIC_DOCUMENT_TEXT: &str = "Hello";
pub const DOCUMENT_TITLE: &str = "Greeting";

const MM_PER_PT: f32 = 25.4 / 72.0;

/// What the document's single line says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentContent {
    /// The request's greeting.
    #[default]
    Greeting,
    /// A fixed `"Hello"`, regardless of the request.
    Static,
}

impl DocumentContent {
    pub const EXPECTED_VALUES: &'static str = "greeting, static";

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "greeting" => Some(Self::Greeting),
            "static" => Some(Self::Static),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Static => "static",
        }
    }

    pub fn line_text(self, greeting: &str) -> String {
        match self {
            Self::Greeting => greeting.to_string(),
            Self::Static => STATIC_DOCUMENT_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub title: String,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Cursor position measured from the top-left corner of the page.
    pub cursor_x_mm: f32,
    pub cursor_y_mm: f32,
    pub bold: bool,
    pub font_size_pt: f32,
    pub cell_height_mm: f32,
    pub text: String,
}

impl DocumentLayout {
    pub fn single_line(text: impl Into<String>) -> Self {
        Self {
            title: DOCUMENT_TITLE.to_string(),
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            cursor_x_mm: 0.0,
            cursor_y_mm: 0.0,
            bold: true,
            font_size_pt: FONT_SIZE_PT,
            cell_height_mm: CELL_HEIGHT_MM,
            text: text.into(),
        }
    }

    pub fn text_x_mm(&self) -> f32 {
        self.cursor_x_mm + CELL_MARGIN_MM
    }

    /// Baseline of the line, vertically centred in its cell, in PDF page
    /// coordinates (origin at the bottom-left).
    pub fn baseline_y_mm(&self) -> f32 {
        let font_size_mm = self.font_size_pt * MM_PER_PT;
        let from_top = self.cursor_y_mm + self.cell_height_mm / 2.0 + 0.3 * font_size_mm;
        self.page_height_mm - from_top
    }

    fn font(&self) -> BuiltinFont {
        if self.bold {
            BuiltinFont::HelveticaBold
        } else {
            BuiltinFont::Helvetica
        }
    }
}

/// The built-in fonts only carry single-byte glyphs; anything outside
/// printable Latin-1 would be dropped from the page without notice.
fn check_encodable(text: &str) -> Result<(), GenerationError> {
    match text
        .chars()
        .find(|character| !matches!(u32::from(*character), 0x20..=0x7E | 0xA0..=0xFF))
    {
        Some(character) => Err(GenerationError::UnsupportedCharacter { character }),
        None => Ok(()),
    }
}

pub fn render_document(layout: &DocumentLayout) -> Result<Vec<u8>, GenerationError> {
    check_encodable(&layout.text)?;

    let (document, page, layer) = PdfDocument::new(
        layout.title.as_str(),
        Mm(layout.page_width_mm),
        Mm(layout.page_height_mm),
        "Layer 1",
    );
    let font = document.add_builtin_font(layout.font())?;
    document.get_page(page).get_layer(layer).use_text(
        layout.text.as_str(),
        layout.font_size_pt,
        Mm(layout.text_x_mm()),
        Mm(layout.baseline_y_mm()),
        &font,
    );

    Ok(document.save_to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_content_uses_request_greeting() {
        assert_eq!(
            DocumentContent::Greeting.line_text("Hello Jane Doe!"),
            "Hello Jane Doe!"
        );
        assert_eq!(DocumentContent::Static.line_text("Hello Jane Doe!"), "Hello");
    }

    #[test]
    fn layouts_differ_only_in_text() {
        let jane = DocumentLayout::single_line("Hello Jane Doe!");
        let john = DocumentLayout::single_line("Hello John Roe!");

        assert_ne!(jane, john);
        assert_eq!(
            DocumentLayout {
                text: String::new(),
                ..jane
            },
            DocumentLayout {
                text: String::new(),
                ..john
            }
        );
    }

    #[test]
    fn line_sits_in_top_left_cell() {
        let layout = DocumentLayout::single_line("Hello");
        assert_eq!(layout.text_x_mm(), CELL_MARGIN_MM);

        let from_top = layout.page_height_mm - layout.baseline_y_mm();
        assert!(from_top > 0.0 && from_top < layout.cell_height_mm);
    }

    #[test]
    fn rendered_document_is_a_pdf() {
        let bytes = render_document(&DocumentLayout::single_line("Hello Jane Doe!"))
            .expect("document should render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn latin_names_render() {
        let bytes = render_document(&DocumentLayout::single_line("Hello José Müller!"))
            .expect("latin-1 text should render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn text_outside_font_encoding_is_refused() {
        let error = render_document(&DocumentLayout::single_line("Hello 李 Wang!"))
            .expect_err("unencodable text should not render");
        assert!(matches!(
            error,
            GenerationError::UnsupportedCharacter { character: '李' }
        ));
        assert_eq!(error.to_string(), "document font cannot encode character '李'");
    }

    #[test]
    fn control_characters_are_refused() {
        assert!(check_encodable("Hello\tJane").is_err());
        assert!(check_encodable("Hello Zoë!").is_ok());
    }

    #[test]
    fn content_parse_accepts_known_names() {
        assert_eq!(DocumentContent::parse("STATIC"), Some(DocumentContent::Static));
        assert_eq!(DocumentContent::parse("greeting"), Some(DocumentContent::Greeting));
        assert_eq!(DocumentContent::parse("banner"), None);
    }
}

use serde::Serialize;

/// Upload formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    pub const PDF_MIME: &'static str = "application/pdf";
    pub const TEXT_MIME: &'static str = "text/plain";

    /// Maps a declared MIME type (parameters ignored) to a kind.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            Self::PDF_MIME => Some(Self::Pdf),
            Self::TEXT_MIME => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Maps a file name's extension (`.pdf`, `.txt`) to a kind.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => Self::PDF_MIME,
            Self::PlainText => Self::TEXT_MIME,
        }
    }
}

/// Plain text pulled out of one upload. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedDocument {
    pub text: String,
    pub kind: DocumentKind,
    /// Present for PDFs only.
    pub page_count: Option<usize>,
}

impl ExtractedDocument {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_ignores_parameters_and_case() {
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8"),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(
            DocumentKind::from_mime("Application/PDF"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(DocumentKind::from_mime("image/png"), None);
    }

    #[test]
    fn test_from_file_name_uses_extension() {
        assert_eq!(
            DocumentKind::from_file_name("resume.PDF"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_file_name("notes.final.txt"),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(DocumentKind::from_file_name("resume.docx"), None);
        assert_eq!(DocumentKind::from_file_name("README"), None);
    }
}

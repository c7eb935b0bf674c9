use std::fmt;
use std::io::Cursor;

use bytes::Bytes;
use log::debug;
use zip::ZipArchive;

// @module: Document model and format detection

/// Magic bytes at the start of every PDF file
const PDF_MAGIC: &[u8] = b"%PDF-";

/// ZIP entry that identifies a DOCX container
pub const DOCX_DOCUMENT_ENTRY: &str = "word/document.xml";

/// ZIP entry that identifies a PPTX container
pub const PPTX_PRESENTATION_ENTRY: &str = "ppt/presentation.xml";

/// Supported document formats
///
/// Determined once per document; drives which extractor/generator pair is
/// selected. The extractor and generator of a pipeline run always share the
/// same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Plain UTF-8 text (also the fallback for unrecognized inputs)
    PlainText,
    /// Portable Document Format
    Pdf,
    /// Office Open XML word-processing document
    Docx,
    /// Office Open XML presentation
    Pptx,
}

impl DocumentFormat {
    /// Output file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Pptx => "pptx",
        }
    }

    /// Map a filename extension to a format, if recognized
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "pptx" => Some(Self::Pptx),
            _ => None,
        }
    }

    /// Map a declared MIME type to a format, if recognized
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let ct = content_type.to_lowercase();
        if ct == "application/pdf" {
            Some(Self::Pdf)
        } else if ct.contains("officedocument.wordprocessingml.document") {
            Some(Self::Docx)
        } else if ct.contains("officedocument.presentationml.presentation") {
            Some(Self::Pptx)
        } else if ct.starts_with("text/") {
            Some(Self::PlainText)
        } else {
            None
        }
    }

    /// Sniff the format from the raw bytes of a document
    ///
    /// Zip containers are identified by their required internal entry; PDFs
    /// by the `%PDF-` signature. Returns `None` when nothing matches.
    pub fn sniff_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PDF_MAGIC) {
            return Some(Self::Pdf);
        }
        if let Ok(mut archive) = ZipArchive::new(Cursor::new(bytes)) {
            if archive.by_name(DOCX_DOCUMENT_ENTRY).is_ok() {
                return Some(Self::Docx);
            }
            if archive.by_name(PPTX_PRESENTATION_ENTRY).is_ok() {
                return Some(Self::Pptx);
            }
        }
        None
    }

    /// Resolve the format of an uploaded document
    ///
    /// Resolution order: filename extension, declared content type, binary
    /// sniff, then `PlainText`. Never fails: translation must not hard-fail
    /// merely because format detection is ambiguous.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>, bytes: &[u8]) -> Self {
        if let Some(name) = file_name {
            if let Some(ext) = name.rsplit('.').next().filter(|e| *e != name) {
                if let Some(format) = Self::from_extension(ext) {
                    return format;
                }
            }
        }

        if let Some(ct) = content_type {
            if let Some(format) = Self::from_content_type(ct) {
                return format;
            }
        }

        if let Some(format) = Self::sniff_bytes(bytes) {
            return format;
        }

        debug!(
            "Unrecognized document format (name: {:?}, content-type: {:?}), falling back to plain text",
            file_name, content_type
        );
        Self::PlainText
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// An uploaded document: immutable bytes plus whatever the uploader declared
///
/// Created at the upload boundary, consumed once by format detection and
/// text extraction, then discarded.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Declared filename, if any
    pub file_name: Option<String>,
    /// Declared MIME type, if any
    pub content_type: Option<String>,
    /// Raw document bytes
    pub bytes: Bytes,
}

impl SourceDocument {
    /// Create a new source document
    pub fn new(
        file_name: Option<String>,
        content_type: Option<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        SourceDocument {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Detect the format of this document
    pub fn format(&self) -> DocumentFormat {
        DocumentFormat::detect(
            self.file_name.as_deref(),
            self.content_type.as_deref(),
            &self.bytes,
        )
    }
}

/// One extracted paragraph with its structural marker
///
/// Block order always matches the source document's reading order: body
/// order for DOCX, slide-number-ascending order for PPTX.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock {
    /// Whitespace-normalized paragraph text
    pub text: String,
    /// Whether the paragraph is a list item
    pub is_bullet: bool,
}

impl ExtractedBlock {
    /// Create a plain paragraph block
    pub fn paragraph(text: impl Into<String>) -> Self {
        ExtractedBlock {
            text: text.into(),
            is_bullet: false,
        }
    }

    /// Create a bullet list-item block
    pub fn bullet(text: impl Into<String>) -> Self {
        ExtractedBlock {
            text: text.into(),
            is_bullet: true,
        }
    }
}

use crate::errors::ExtractionError;

// @module: PDF text extraction

/// Extract the flat text of a PDF, page order ascending
///
/// Uses a layout-aware text stripper so multi-column or out-of-order
/// content-stream text comes out in visual reading order. No bullet
/// detection is attempted for PDF; the two private-use bullet glyphs some
/// generators emit are normalized to the standard bullet character.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    Ok(normalize_bullets(&text))
}

/// Map the Symbol/Wingdings private-use bullet code points to `•`
fn normalize_bullets(text: &str) -> String {
    text.replace(['\u{F0B7}', '\u{F0A7}'], "\u{2022}")
}

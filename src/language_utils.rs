use anyhow::{anyhow, Result};
use isolang::Language;

use crate::providers::{AUTO_LANGUAGE, UNDETERMINED_LANGUAGE};

/// Language utilities for ISO language code handling
///
/// The translation backend speaks ISO 639-1 (2-letter) codes plus the
/// pseudo-code "auto". These helpers validate what the user typed and
/// normalize 3-letter ISO 639-3 codes down to the 2-letter form the
/// backend expects.
/// Language code type
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
    /// The "auto" pseudo-code (source side only)
    Auto,
}

/// Validate a language code as ISO 639-1, ISO 639-3 or "auto"
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized = code.trim().to_lowercase();

    if normalized == AUTO_LANGUAGE {
        return Ok(LanguageCodeType::Auto);
    }

    if normalized.len() == 2 && Language::from_639_1(&normalized).is_some() {
        return Ok(LanguageCodeType::Part1);
    }

    if normalized.len() == 3 && Language::from_639_3(&normalized).is_some() {
        return Ok(LanguageCodeType::Part3);
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to the 2-letter form the backend expects
///
/// 3-letter codes that have no 2-letter equivalent are passed through
/// unchanged; "auto" and "und" are preserved as-is.
pub fn normalize_language_code(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    if normalized == AUTO_LANGUAGE || normalized == UNDETERMINED_LANGUAGE {
        return Ok(normalized);
    }

    match validate_language_code(&normalized)? {
        LanguageCodeType::Part1 | LanguageCodeType::Auto => Ok(normalized),
        LanguageCodeType::Part3 => {
            let language = Language::from_639_3(&normalized)
                .ok_or_else(|| anyhow!("Invalid language code: {}", code))?;
            Ok(language
                .to_639_1()
                .map(str::to_string)
                .unwrap_or(normalized))
        }
    }
}

/// English display name for a language code, when known
pub fn language_name(code: &str) -> Option<&'static str> {
    let normalized = code.trim().to_lowercase();
    if normalized == UNDETERMINED_LANGUAGE {
        return Some("Undetermined");
    }
    let language = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }?;
    Some(language.to_name())
}

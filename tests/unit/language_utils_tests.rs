/*!
 * Tests for language code utilities
 */

use doctran::language_utils::{language_name, normalize_language_code, validate_language_code};

/// Test that valid 2-letter codes are accepted
#[test]
fn test_validate_language_code_withTwoLetterCode_shouldAccept() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("PT").is_ok());
    assert!(validate_language_code(" fr ").is_ok());
}

/// Test that valid 3-letter codes are accepted
#[test]
fn test_validate_language_code_withThreeLetterCode_shouldAccept() {
    assert!(validate_language_code("por").is_ok());
    assert!(validate_language_code("DEU").is_ok());
}

/// Test that "auto" is accepted as a pseudo-code
#[test]
fn test_validate_language_code_withAuto_shouldAccept() {
    assert!(validate_language_code("auto").is_ok());
}

/// Test that garbage codes are rejected
#[test]
fn test_validate_language_code_withInvalidCode_shouldReject() {
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("zzz").is_err());
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("english").is_err());
}

/// Test normalization down to the 2-letter form
#[test]
fn test_normalize_language_code_withThreeLetterCode_shouldReturnTwoLetter() {
    assert_eq!(normalize_language_code("por").unwrap(), "pt");
    assert_eq!(normalize_language_code("deu").unwrap(), "de");
    assert_eq!(normalize_language_code("EN").unwrap(), "en");
}

/// Test that "auto" and "und" pass through normalization unchanged
#[test]
fn test_normalize_language_code_withPseudoCodes_shouldPassThrough() {
    assert_eq!(normalize_language_code("auto").unwrap(), "auto");
    assert_eq!(normalize_language_code("und").unwrap(), "und");
}

/// Test English display names
#[test]
fn test_language_name_withKnownCodes_shouldReturnNames() {
    assert_eq!(language_name("pt"), Some("Portuguese"));
    assert_eq!(language_name("deu"), Some("German"));
    assert_eq!(language_name("und"), Some("Undetermined"));
    assert_eq!(language_name("zz"), None);
}

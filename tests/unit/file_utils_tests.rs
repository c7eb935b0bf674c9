/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use doctran::file_utils::FileManager;
use std::fs;

use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "test_file_exists.tmp",
        "test content",
    )?;

    assert!(FileManager::file_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that dir_exists returns false for non-existent directories
#[test]
fn test_dir_exists_withNonExistentDir_shouldReturnFalse() {
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));
}

/// Test that output_file_name inserts the target language before the
/// extension
#[test]
fn test_output_file_name_withValidInputs_shouldCreateCorrectName() {
    assert_eq!(
        FileManager::output_file_name(Some("report.docx"), "pt", "docx"),
        "report.pt.docx"
    );
    assert_eq!(
        FileManager::output_file_name(Some("a.b.pdf"), "fr", "pdf"),
        "a.b.fr.pdf"
    );
}

/// Test that a missing or empty original name falls back to "file"
#[test]
fn test_output_file_name_withMissingOriginal_shouldFallBack() {
    assert_eq!(FileManager::output_file_name(None, "es", "txt"), "file.es.txt");
    assert_eq!(
        FileManager::output_file_name(Some(""), "es", "txt"),
        "file.es.txt"
    );
}

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensure_dir_withNestedPath_shouldCreate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a/b/c");

    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));

    // calling again on an existing directory is fine
    FileManager::ensure_dir(&nested)?;

    Ok(())
}

/// Test that find_documents returns only supported formats, recursively
/// and in sorted order
#[test]
fn test_find_documents_withMixedTree_shouldFilterAndSort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    fs::write(temp_dir.path().join("b.docx"), b"x")?;
    fs::write(temp_dir.path().join("a.srt"), b"x")?;
    fs::write(temp_dir.path().join("c.pdf"), b"x")?;
    fs::create_dir(temp_dir.path().join("nested"))?;
    fs::write(temp_dir.path().join("nested/d.txt"), b"x")?;

    let found = FileManager::find_documents(temp_dir.path())?;
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["b.docx", "c.pdf", "d.txt"]);

    Ok(())
}

/// Test that save_upload prefixes a timestamp to avoid collisions
#[test]
fn test_save_upload_withSameName_shouldNotOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = FileManager::save_upload(temp_dir.path(), "doc.pdf", b"data")?;

    assert!(FileManager::file_exists(&path));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.ends_with("_doc.pdf"));
    assert_ne!(name, "doc.pdf");

    Ok(())
}

/// Test that save_output writes the bytes under the requested name
#[test]
fn test_save_output_withBytes_shouldWriteFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = FileManager::save_output(temp_dir.path(), "out.pt.txt", b"translated")?;

    assert_eq!(fs::read(&path)?, b"translated");

    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::editing::RopeDocument;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a markdown file: {0}")]
    NotMarkdown(PathBuf),
    #[error("File is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),
}

/// Whether `path` has a Markdown extension.
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

/// Read a markdown file into a document with the cursor at the start
pub fn read_file(path: &Path) -> Result<RopeDocument, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    if !is_markdown(path) {
        return Err(IoError::NotMarkdown(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    RopeDocument::from_bytes(&bytes).map_err(|_| IoError::InvalidUtf8(path.to_path_buf()))
}

/// Write a document's exact bytes back to a markdown file
pub fn write_file(path: &Path, doc: &RopeDocument) -> Result<(), IoError> {
    if !is_markdown(path) {
        return Err(IoError::NotMarkdown(path.to_path_buf()));
    }

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, doc.to_bytes())?;
    Ok(())
}

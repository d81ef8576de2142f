//! Plain-text identifier lists: `id1,id2,id3`.
//!
//! Tokens are not escaped, so an identifier containing a comma cannot be
//! represented. Workshop identifiers are numeric in practice.

use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::info;

#[derive(Error, Debug)]
pub enum IdListError {
    #[error("Failed to access identifier list {0}: {1}")]
    IoError(String, #[source] std::io::Error),
}

/// Split comma-separated text into identifiers. Surrounding whitespace is
/// trimmed and empty tokens are dropped.
pub fn parse_identifier_list(content: &str) -> Vec<String> {
    content
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_identifier_list<S: AsRef<str>>(identifiers: &[S]) -> String {
    identifiers
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

pub async fn read_identifier_list(path: &Path) -> Result<Vec<String>, IdListError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| IdListError::IoError(path.display().to_string(), e))?;
    Ok(parse_identifier_list(&content))
}

/// Write identifiers to `path`, joined by commas with no trailing newline
pub async fn write_identifier_list<S: AsRef<str>>(
    path: &Path,
    identifiers: &[S],
) -> Result<(), IdListError> {
    fs::write(path, format_identifier_list(identifiers))
        .await
        .map_err(|e| IdListError::IoError(path.display().to_string(), e))?;
    info!(
        path = %path.display(),
        count = identifiers.len(),
        "Identifier list written"
    );
    Ok(())
}

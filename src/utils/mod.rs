// Utility functions
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::warn;

/// Reduce a name to `[A-Za-z0-9_-]`, spaces become dashes
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || *c == ' ')
        .map(|c| if c == ' ' { '-' } else { c })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

/// Validate and canonicalize output directory path
pub fn validate_output_dir(dir: &str) -> Result<PathBuf> {
    let path = PathBuf::from(dir);

    // Check for path traversal attempts
    if dir.contains("..") {
        warn!(
            "Security: Blocked path traversal attempt in directory: {}",
            dir
        );
        return Err(Error::Validation("Path traversal not allowed".to_string()));
    }

    if path.exists() {
        path.canonicalize()
            .map_err(|e| Error::Internal(format!("Failed to canonicalize path: {e}")))
    } else {
        Ok(path)
    }
}

/// Truncate text to a maximum number of characters
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

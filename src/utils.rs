//! Common utility functions shared across the codebase.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Current UTC time as an RFC 3339 string.
///
/// # Examples
///
/// ```
/// let now = lexi::utils::now_rfc3339().unwrap();
/// assert!(now.ends_with('Z'));
/// ```
pub fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("Failed to format timestamp")
}

/// Write `content` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

//! Key extraction over file contents.
//!
//! Each call builds a fresh [`KeyMap`]; nothing is shared between calls, so
//! the verifier can run the extractor as often as it needs.

use std::{borrow::Cow, collections::HashSet, fs, path::Path};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::{
    context::extract_context,
    files::{SourceFile, resolve_files},
    patterns::{CALL_PATTERNS, is_sensitive_key},
    types::{KeyMap, Occurrence},
};

/// Result of extracting keys from a set of inputs.
#[derive(Debug, Default)]
pub struct Extraction {
    pub keys: KeyMap,
    /// Files matched by the inputs, before exclusion.
    pub total_files: usize,
    /// Files actually read.
    pub processed_files: usize,
}

/// Summary numbers for an extraction run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    pub total_keys: usize,
    pub total_occurrences: usize,
    pub files_with_translations: usize,
    pub average_keys_per_file: f64,
}

impl ExtractionStats {
    pub fn from_keys(keys: &KeyMap) -> Self {
        let total_keys = keys.len();
        let total_occurrences = keys.values().map(|k| k.occurrences).sum();
        let files: HashSet<&str> = keys
            .values()
            .flat_map(|k| k.files.iter().map(|f| f.file.as_str()))
            .collect();
        let average_keys_per_file = if files.is_empty() {
            0.0
        } else {
            total_keys as f64 / files.len() as f64
        };

        Self {
            total_keys,
            total_occurrences,
            files_with_translations: files.len(),
            average_keys_per_file,
        }
    }

    pub fn log(&self) {
        info!("Extraction Statistics:");
        info!("  - Total unique keys: {}", self.total_keys);
        info!("  - Total occurrences: {}", self.total_occurrences);
        info!("  - Files with translations: {}", self.files_with_translations);
        info!("  - Average keys per file: {:.2}", self.average_keys_per_file);
    }
}

/// 0-indexed line of a byte offset.
fn line_of(content: &str, offset: usize) -> usize {
    content.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
}

/// Extract keys from already-loaded source text.
///
/// `file` is the path recorded on each occurrence.
pub fn extract_keys_from_source(content: &str, file: &str, include_context: bool) -> KeyMap {
    let mut keys = KeyMap::new();

    for pattern in CALL_PATTERNS.iter() {
        for captures in pattern.regex.captures_iter(content) {
            let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let key = key.as_str();

            if is_sensitive_key(key) {
                warn!("Skipping potentially sensitive key: {}", key);
                continue;
            }

            let line_index = line_of(content, whole.start());
            let context =
                include_context.then(|| extract_context(content, line_index, whole.start()));

            keys.entry(key, pattern.name).record(Occurrence {
                file: file.to_string(),
                line: line_index + 1,
                pattern: pattern.name.to_string(),
                context,
            });
        }
    }

    keys
}

/// Extract keys from one file.
///
/// `label` is the path recorded on each occurrence. Invalid UTF-8 is decoded
/// lossily. A file that cannot be read is logged and yields no keys.
pub fn extract_keys_from_file(path: &Path, label: &str, include_context: bool) -> KeyMap {
    debug!("Processing file: {}", label);

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Error processing file {}: {}", label, e);
            return KeyMap::new();
        }
    };
    let content = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = content {
        warn!("File {} is not valid UTF-8, invalid bytes replaced", label);
    }

    let keys = extract_keys_from_source(&content, label, include_context);
    if !keys.is_empty() {
        debug!("Extracted {} keys from {}", keys.len(), label);
    }
    keys
}

/// Extract and merge keys from every file the inputs resolve to.
pub fn extract_keys_from_files(
    base_dir: &Path,
    inputs: &[String],
    excludes: &[String],
    include_context: bool,
) -> Extraction {
    let resolved = resolve_files(base_dir, inputs, excludes);
    let mut extraction = Extraction {
        total_files: resolved.matched_count,
        ..Default::default()
    };

    for SourceFile { path, display: label } in &resolved.files {
        let keys = extract_keys_from_file(path, label, include_context);
        extraction.keys.extend(keys);
        extraction.processed_files += 1;
    }

    info!(
        "Processed {}/{} files",
        extraction.processed_files, extraction.total_files
    );
    extraction
}

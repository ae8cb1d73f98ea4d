//! Resolution of extractor inputs into a list of source files.
//!
//! An input entry is one of:
//! - a glob pattern (`src/**/*.{ts,tsx}`), brace alternatives expanded first
//! - a negated glob (`!src/**/*.test.tsx`), whose matches are excluded
//! - a literal file path
//! - a literal directory, walked recursively for source files

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::DEFAULT_EXCLUDES;

/// File extensions scanned when a directory is given as input.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// A resolved source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path used to read the file.
    pub path: PathBuf,
    /// Path shown in output, relative to the scan root when possible.
    pub display: String,
}

/// Result of resolving inputs.
#[derive(Debug, Default)]
pub struct ResolvedFiles {
    pub files: Vec<SourceFile>,
    /// Number of files matched by positive entries before exclusion.
    pub matched_count: usize,
}

/// Check if an entry contains glob wildcards or brace alternatives.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Expand brace alternatives, which the `glob` crate does not support.
///
/// `src/*.{ts,tsx}` becomes `src/*.ts` and `src/*.tsx`. Nested and multiple
/// groups expand to their cartesian product. Unbalanced braces are kept as-is.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };

    let mut depth = 0;
    let mut close = None;
    let mut splits = Vec::new();
    for (i, c) in pattern[open..].char_indices() {
        let i = open + i;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(i),
            _ => {}
        }
    }

    let Some(close) = close else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];

    let mut alternatives = Vec::new();
    let mut start = open + 1;
    for split in splits.into_iter().chain(std::iter::once(close)) {
        alternatives.push(&pattern[start..split]);
        start = split + 1;
    }

    alternatives
        .into_iter()
        .flat_map(|alt| expand_braces(&format!("{}{}{}", prefix, alt, suffix)))
        .collect()
}

/// Read a newline-delimited list of file entries, skipping blank lines.
pub fn read_file_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file list: {:?}", path))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Display form of `path`: relative to `base_dir` with `/` separators.
fn display_path(base_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}

fn compile_patterns(patterns: impl IntoIterator<Item = String>) -> Vec<Pattern> {
    patterns
        .into_iter()
        .flat_map(|p| expand_braces(&p))
        .filter_map(|p| match Pattern::new(&p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("Invalid exclude pattern '{}': {}", p, e);
                None
            }
        })
        .collect()
}

/// Resolve input entries against `base_dir`.
///
/// Files matching the default excludes, `excludes`, or any negated entry are
/// dropped. Each file appears once, in first-match order.
pub fn resolve_files(base_dir: &Path, entries: &[String], excludes: &[String]) -> ResolvedFiles {
    let (negations, positives): (Vec<&String>, Vec<&String>) =
        entries.iter().partition(|e| e.starts_with('!'));

    let exclude_patterns = compile_patterns(
        DEFAULT_EXCLUDES
            .iter()
            .map(|p| p.to_string())
            .chain(excludes.iter().cloned())
            .chain(negations.iter().map(|n| n[1..].to_string())),
    );

    let mut result = ResolvedFiles::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    let mut push = |path: PathBuf, result: &mut ResolvedFiles| {
        result.matched_count += 1;
        let display_name = display_path(base_dir, &path);
        if exclude_patterns.iter().any(|p| p.matches(&display_name)) {
            debug!("Excluded: {}", display_name);
            return;
        }
        if seen.insert(path.clone()) {
            result.files.push(SourceFile {
                path,
                display: display_name,
            });
        }
    };

    for entry in positives {
        if is_glob_pattern(entry) {
            for expanded in expand_braces(entry) {
                let full_pattern = if Path::new(&expanded).is_absolute() {
                    expanded
                } else {
                    format!(
                        "{}/{}",
                        Pattern::escape(&base_dir.to_string_lossy()),
                        expanded
                    )
                };
                match glob(&full_pattern) {
                    Ok(paths) => {
                        for path in paths.flatten() {
                            if path.is_file() {
                                push(path, &mut result);
                            }
                        }
                    }
                    Err(e) => warn!("Invalid glob pattern '{}': {}", entry, e),
                }
            }
            continue;
        }

        let path = base_dir.join(entry);
        if path.is_file() {
            push(path, &mut result);
        } else if path.is_dir() {
            for dir_entry in WalkDir::new(&path).sort_by_file_name() {
                match dir_entry {
                    Ok(e) if e.file_type().is_file() && is_source_file(e.path()) => {
                        push(e.into_path(), &mut result);
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Cannot access path: {}", e),
                }
            }
        } else {
            warn!("Input path does not exist: {}", path.display());
        }
    }

    result
}

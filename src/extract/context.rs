//! Translator context for a key occurrence.

use std::sync::LazyLock;

use regex::Regex;

use super::types::KeyContext;

/// Lines of source shown on each side of the match line.
const CONTEXT_RADIUS: usize = 3;

static COMPONENT_DECL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:export\s+)?(?:const|function)\s+([A-Z][A-Za-z0-9]*)").unwrap()
});

static FUNCTION_DECL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:export\s+)?function\s+([a-zA-Z][A-Za-z0-9]*)").unwrap()
});

static METHOD_DECL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([a-zA-Z][A-Za-z0-9]*)\s*[=:]\s*(?:async\s+)?(?:\([^)]*\)\s*=>|\([^)]*\)\s*\{|function)",
    )
    .unwrap()
});

static NOTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*\s*i18n:\s*(.+?)\s*\*/\s*$").unwrap());

/// Build the context for a match on `line_index` (0-indexed) starting at
/// byte `match_start`.
pub fn extract_context(content: &str, line_index: usize, match_start: usize) -> KeyContext {
    let lines: Vec<&str> = content.split('\n').collect();
    let line_index = line_index.min(lines.len().saturating_sub(1));
    let start = line_index.saturating_sub(CONTEXT_RADIUS);
    let end = (line_index + CONTEXT_RADIUS).min(lines.len().saturating_sub(1));

    KeyContext {
        surrounding: lines[start..=end].iter().map(|l| l.to_string()).collect(),
        line_number: line_index + 1,
        component: find_backwards(&lines, line_index, &[&COMPONENT_DECL_REGEX]),
        function: find_backwards(&lines, line_index, &[&FUNCTION_DECL_REGEX, &METHOD_DECL_REGEX]),
        note: translator_note(&content[..match_start]),
    }
}

/// Walk upwards from `line_index` and return the first capture of any regex.
fn find_backwards(lines: &[&str], line_index: usize, regexes: &[&Regex]) -> Option<String> {
    lines[..=line_index].iter().rev().find_map(|line| {
        regexes
            .iter()
            .find_map(|re| re.captures(line).map(|c| c[1].to_string()))
    })
}

/// Note from an `/* i18n: ... */` comment directly before the call.
fn translator_note(preceding: &str) -> Option<String> {
    let trimmed = preceding.trim_end();
    if !trimmed.ends_with("*/") {
        return None;
    }
    let comment_start = trimmed.rfind("/*")?;
    NOTE_REGEX
        .captures(&trimmed[comment_start..])
        .map(|c| c[1].to_string())
}

//! Cross-locale completeness analysis.

use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::locale::load_locale_file;
use crate::{config::Config, extract::extract_keys_from_files};

/// Classifies keys by the configured critical prefixes.
#[derive(Debug, Clone)]
pub struct CriticalMatcher {
    patterns: Vec<Regex>,
}

impl CriticalMatcher {
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.critical_regexes()?))
    }

    pub fn is_critical(&self, key: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(key))
    }

    pub fn filter<'a>(&self, keys: impl IntoIterator<Item = &'a String>) -> Vec<String> {
        keys.into_iter()
            .filter(|k| self.is_critical(k))
            .cloned()
            .collect()
    }
}

/// Percentage of `source_keys` present in `target_keys`.
///
/// An empty source is fully translated by definition.
pub fn calculate_completeness<S: AsRef<str>, T: AsRef<str>>(
    source_keys: &[S],
    target_keys: &[T],
) -> f64 {
    if source_keys.is_empty() {
        return 100.0;
    }
    let target: HashSet<&str> = target_keys.iter().map(AsRef::as_ref).collect();
    let translated = source_keys
        .iter()
        .filter(|k| target.contains(k.as_ref()))
        .count();
    translated as f64 / source_keys.len() as f64 * 100.0
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Keys in `keys` that are absent from `other`, in `keys` order.
pub fn difference(keys: &[String], other: &HashSet<&str>) -> Vec<String> {
    keys.iter()
        .filter(|k| !other.contains(k.as_str()))
        .cloned()
        .collect()
}

/// A finding about the source translation file as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComplianceIssue {
    /// Defined in the source translation file, never used in code.
    UnusedKeys { count: usize, keys: Vec<String> },
    /// Used in code, not defined in the source translation file.
    MissingInTranslations { count: usize, keys: Vec<String> },
}

impl ComplianceIssue {
    pub fn unused_keys(keys: Vec<String>) -> Self {
        ComplianceIssue::UnusedKeys {
            count: keys.len(),
            keys,
        }
    }

    pub fn missing_in_translations(keys: Vec<String>) -> Self {
        ComplianceIssue::MissingInTranslations {
            count: keys.len(),
            keys,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            ComplianceIssue::UnusedKeys { count, .. }
            | ComplianceIssue::MissingInTranslations { count, .. } => *count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleStatus {
    Ok,
    Incomplete,
    Error,
}

impl std::fmt::Display for LocaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocaleStatus::Ok => write!(f, "ok"),
            LocaleStatus::Incomplete => write!(f, "incomplete"),
            LocaleStatus::Error => write!(f, "error"),
        }
    }
}

/// Comparison of one target locale against the source locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleDetail {
    pub status: LocaleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Percent, rounded to two decimals.
    pub completeness: f64,
    #[serde(rename = "totalKeys", default)]
    pub total_keys: usize,
    pub missing: Vec<String>,
    pub critical_missing: Vec<String>,
    #[serde(default)]
    pub extra_keys: Vec<String>,
}

impl LocaleDetail {
    /// Detail for a locale whose file could not be loaded: every compared key
    /// counts as missing.
    pub fn failed(error: String, compared_keys: &[String], critical: &CriticalMatcher) -> Self {
        Self {
            status: LocaleStatus::Error,
            error: Some(error),
            completeness: 0.0,
            total_keys: 0,
            missing: compared_keys.to_vec(),
            critical_missing: critical.filter(compared_keys),
            extra_keys: Vec::new(),
        }
    }

    /// Compare `target_keys` against `compared_keys` (the source keys under
    /// comparison). `all_source` decides which target keys are extra.
    pub fn compare(
        compared_keys: &[String],
        all_source: &HashSet<&str>,
        target_keys: &[String],
        critical: &CriticalMatcher,
        minimum: f64,
    ) -> Self {
        let target: HashSet<&str> = target_keys.iter().map(String::as_str).collect();
        let missing = difference(compared_keys, &target);
        let critical_missing = critical.filter(&missing);
        let completeness = calculate_completeness(compared_keys, target_keys);

        Self {
            status: if completeness >= minimum {
                LocaleStatus::Ok
            } else {
                LocaleStatus::Incomplete
            },
            error: None,
            completeness: round2(completeness),
            total_keys: target_keys.len(),
            missing,
            critical_missing,
            extra_keys: difference(target_keys, all_source),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_keys: usize,
    pub critical_keys: usize,
    /// Unrounded completeness of every locale that loaded.
    pub completeness: BTreeMap<String, f64>,
    pub issues: Vec<ComplianceIssue>,
}

/// Result of one verification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub timestamp: String,
    pub source_locale: String,
    pub target_locales: Vec<String>,
    pub summary: AnalysisSummary,
    pub details: BTreeMap<String, LocaleDetail>,
}

impl Analysis {
    /// True if any locale is missing a critical key.
    pub fn has_critical_missing(&self) -> bool {
        self.details.values().any(|d| !d.critical_missing.is_empty())
    }

    pub fn critical_missing_count(&self) -> usize {
        self.details.values().map(|d| d.critical_missing.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    /// Compare only critical keys across locales.
    pub critical_only: bool,
}

/// Analyze the configured locales under `root`.
///
/// Returns `Ok(None)` when the source locale cannot be loaded, since nothing
/// can be measured without it. A target locale that fails to load is recorded
/// as an error detail and the other locales are still analyzed.
pub fn analyze_translations(
    root: &Path,
    config: &Config,
    options: AnalysisOptions,
    timestamp: &str,
) -> Result<Option<Analysis>> {
    info!("Analyzing translation completeness...");

    let critical = CriticalMatcher::from_config(config)?;
    let source_path = root.join(config.locale_path(&config.source_locale));
    let source = match load_locale_file(&source_path, &config.source_locale) {
        Ok(source) => source,
        Err(e) => {
            error!("Unable to load source translations from {}: {:#}", source_path.display(), e);
            return Ok(None);
        }
    };

    let source_keys = source.keys();
    let source_set: HashSet<&str> = source_keys.iter().map(String::as_str).collect();
    let critical_keys = critical.filter(&source_keys);

    let mut summary = AnalysisSummary {
        total_keys: source_keys.len(),
        critical_keys: critical_keys.len(),
        ..Default::default()
    };
    info!(
        "Found {} keys in source ({} critical)",
        summary.total_keys, summary.critical_keys
    );

    let code = extract_keys_from_files(
        &config.source_dir(root),
        &config.includes,
        &config.excludes,
        false,
    );
    let code_keys: Vec<String> = code.keys.keys().map(String::from).collect();
    let code_set: HashSet<&str> = code_keys.iter().map(String::as_str).collect();
    info!("Found {} keys in source code", code_keys.len());

    let unused = difference(&source_keys, &code_set);
    if !unused.is_empty() {
        warn!("Found {} unused translation keys", unused.len());
        summary.issues.push(ComplianceIssue::unused_keys(unused));
    }

    let missing_in_translations = difference(&code_keys, &source_set);
    if !missing_in_translations.is_empty() {
        warn!(
            "Found {} keys missing from translation files",
            missing_in_translations.len()
        );
        summary
            .issues
            .push(ComplianceIssue::missing_in_translations(missing_in_translations));
    }

    let compared_keys = if options.critical_only {
        &critical_keys
    } else {
        &source_keys
    };

    let mut details = BTreeMap::new();
    for locale in &config.target_locales {
        info!("Analyzing locale: {}", locale);

        let target_path = root.join(config.locale_path(locale));
        let target = match load_locale_file(&target_path, locale) {
            Ok(target) => target,
            Err(e) => {
                warn!("Translation file for '{}' not found or invalid: {:#}", locale, e);
                details.insert(
                    locale.clone(),
                    LocaleDetail::failed(
                        "Translation file not found or invalid".to_string(),
                        compared_keys,
                        &critical,
                    ),
                );
                continue;
            }
        };

        let target_keys = target.keys();
        let completeness = calculate_completeness(compared_keys, &target_keys);
        let detail = LocaleDetail::compare(
            compared_keys,
            &source_set,
            &target_keys,
            &critical,
            config.thresholds.minimum,
        );

        info!(
            "Locale {}: {:.2}% complete ({} missing, {} critical)",
            locale,
            completeness,
            detail.missing.len(),
            detail.critical_missing.len()
        );

        summary.completeness.insert(locale.clone(), completeness);
        details.insert(locale.clone(), detail);
    }

    Ok(Some(Analysis {
        timestamp: timestamp.to_string(),
        source_locale: config.source_locale.clone(),
        target_locales: config.target_locales.clone(),
        summary,
        details,
    }))
}

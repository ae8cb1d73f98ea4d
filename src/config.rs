use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::files::expand_braces;

pub const CONFIG_FILE_NAME: &str = ".lexirc.json";

/// Files that never contribute translation keys.
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules/**", "dist/**", "build/**", "**/*.d.ts"];

/// Key prefixes that must be translated in every locale.
pub const CRITICAL_PATTERNS: &[&str] = &[
    r"^auth\.",
    r"^error\.",
    r"^navigation\.",
    r"^form\.validation\.",
    r"^accessibility\.",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_translations_root")]
    pub translations_root: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    #[serde(default = "default_target_locales")]
    pub target_locales: Vec<String>,
    /// Per-locale file name overrides; locales not listed use `{locale}.json`.
    #[serde(default)]
    pub locale_files: BTreeMap<String, String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default = "default_critical_patterns")]
    pub critical_patterns: Vec<String>,
    #[serde(default)]
    pub thresholds: Thresholds,
}

/// Completeness thresholds, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    #[serde(default = "default_minimum")]
    pub minimum: f64,
    #[serde(default = "default_target")]
    pub target: f64,
    #[serde(default = "default_critical")]
    pub critical: f64,
}

fn default_translations_root() -> String {
    "public/api/translations".to_string()
}

fn default_source_root() -> String {
    ".".to_string()
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_target_locales() -> Vec<String> {
    vec!["ar".to_string()]
}

pub fn default_includes() -> Vec<String> {
    [
        "src/**/*.{ts,tsx,js,jsx}",
        "!src/**/*.test.{ts,tsx,js,jsx}",
        "!src/**/*.stories.{ts,tsx,js,jsx}",
        "!src/integrations/supabase/types.ts",
    ]
    .map(String::from)
    .to_vec()
}

fn default_critical_patterns() -> Vec<String> {
    CRITICAL_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn default_minimum() -> f64 {
    80.0
}

fn default_target() -> f64 {
    95.0
}

fn default_critical() -> f64 {
    100.0
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            minimum: default_minimum(),
            target: default_target(),
            critical: default_critical(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translations_root: default_translations_root(),
            source_root: default_source_root(),
            source_locale: default_source_locale(),
            target_locales: default_target_locales(),
            locale_files: BTreeMap::new(),
            includes: default_includes(),
            excludes: Vec::new(),
            critical_patterns: default_critical_patterns(),
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob in `includes`/`excludes` or any regex in
    /// `criticalPatterns` is invalid.
    pub fn validate(&self) -> Result<()> {
        for entry in &self.includes {
            let pattern = entry.strip_prefix('!').unwrap_or(entry);
            for expanded in expand_braces(pattern) {
                Pattern::new(&expanded).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", entry)
                })?;
            }
        }

        for entry in &self.excludes {
            Pattern::new(entry)
                .with_context(|| format!("Invalid glob pattern in 'excludes': \"{}\"", entry))?;
        }

        for pattern in &self.critical_patterns {
            Regex::new(pattern).with_context(|| {
                format!("Invalid regex in 'criticalPatterns': \"{}\"", pattern)
            })?;
        }

        Ok(())
    }

    /// File name of a locale inside `translations_root`.
    pub fn locale_file_name(&self, locale: &str) -> String {
        self.locale_files
            .get(locale)
            .cloned()
            .unwrap_or_else(|| format!("{}.json", locale))
    }

    pub fn locale_path(&self, locale: &str) -> PathBuf {
        Path::new(&self.translations_root).join(self.locale_file_name(locale))
    }

    /// Directory the extractor scans, with `.` components dropped.
    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.source_root).components().collect()
    }

    pub fn critical_regexes(&self) -> Result<Vec<Regex>> {
        self.critical_patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("Invalid critical pattern: {}", p)))
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!("Loaded configuration from {}", path.display());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

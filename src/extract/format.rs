//! Output formats for extracted keys.
//!
//! Formatters are pure: they only serialize a [`KeyMap`].

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::ValueEnum;
use enum_dispatch::enum_dispatch;
use serde::Serialize;

use super::types::KeyMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum KeyFormat {
    #[default]
    Json,
    Csv,
    Yaml,
}

impl KeyFormat {
    /// Build the formatter for this format. `generated_at` is stamped into
    /// formats that carry a header.
    pub fn formatter(self, generated_at: &str) -> Formatter {
        match self {
            KeyFormat::Json => JsonFormatter { pretty: true }.into(),
            KeyFormat::Csv => CsvFormatter.into(),
            KeyFormat::Yaml => YamlFormatter {
                generated_at: generated_at.to_string(),
            }
            .into(),
        }
    }
}

#[enum_dispatch]
pub trait FormatKeys {
    fn format(&self, keys: &KeyMap) -> Result<String>;
}

#[enum_dispatch(FormatKeys)]
#[derive(Debug, Clone)]
pub enum Formatter {
    Json(JsonFormatter),
    Csv(CsvFormatter),
    Yaml(YamlFormatter),
}

#[derive(Debug, Clone)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl FormatKeys for JsonFormatter {
    fn format(&self, keys: &KeyMap) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(keys)
        } else {
            serde_json::to_string(keys)
        };
        json.context("Failed to serialize keys as JSON")
    }
}

#[derive(Debug, Clone)]
pub struct CsvFormatter;

/// Quote a CSV cell, doubling embedded quotes.
fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

impl FormatKeys for CsvFormatter {
    fn format(&self, keys: &KeyMap) -> Result<String> {
        let mut lines = vec!["Key,Default Value,Occurrences,Files,Pattern".to_string()];
        for record in keys.values() {
            let files = record
                .files
                .iter()
                .map(|f| format!("{}:{}", f.file, f.line))
                .collect::<Vec<_>>()
                .join(";");
            lines.push(format!(
                "{},{},{},{},{}",
                csv_quote(&record.key),
                csv_quote(&record.default_value),
                record.occurrences,
                csv_quote(&files),
                csv_quote(&record.pattern)
            ));
        }
        Ok(lines.join("\n"))
    }
}

#[derive(Debug, Clone)]
pub struct YamlFormatter {
    pub generated_at: String,
}

#[derive(Serialize)]
struct YamlKey<'a> {
    default: &'a str,
    occurrences: usize,
    pattern: &'a str,
    files: Vec<YamlFile<'a>>,
}

#[derive(Serialize)]
struct YamlFile<'a> {
    file: &'a str,
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<&'a str>,
}

impl FormatKeys for YamlFormatter {
    fn format(&self, keys: &KeyMap) -> Result<String> {
        let sorted: BTreeMap<&str, YamlKey> = keys
            .values()
            .map(|record| {
                let files = record
                    .files
                    .iter()
                    .map(|f| YamlFile {
                        file: &f.file,
                        line: f.line,
                        component: f
                            .context
                            .as_ref()
                            .map(|c| c.component.as_deref().unwrap_or("unknown")),
                    })
                    .collect();
                (
                    record.key.as_str(),
                    YamlKey {
                        default: &record.default_value,
                        occurrences: record.occurrences,
                        pattern: &record.pattern,
                        files,
                    },
                )
            })
            .collect();

        let body = serde_yaml::to_string(&sorted).context("Failed to serialize keys as YAML")?;
        Ok(format!(
            "# Translation Keys\n# Generated: {}\n\n{}",
            self.generated_at, body
        ))
    }
}

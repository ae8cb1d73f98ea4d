use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Flattened locale messages: dotted key path to leaf value, in file order.
pub type FlatMessages = Map<String, Value>;

/// A locale file loaded and flattened.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    pub locale: String,
    pub path: PathBuf,
    pub entries: FlatMessages,
}

impl LocaleFile {
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn load_locale_file(path: &Path, locale: &str) -> Result<LocaleFile> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;

    let Value::Object(root) = json else {
        bail!("Expected a JSON object at the root of {:?}", path);
    };

    let mut entries = FlatMessages::new();
    flatten_object(&root, "", &mut entries);

    Ok(LocaleFile {
        locale: locale.to_string(),
        path: path.to_path_buf(),
        entries,
    })
}

/// Flatten nested objects into dotted paths.
///
/// Only objects are recursed into; arrays and scalars are leaves. An empty
/// object contributes no keys.
pub fn flatten_object(object: &Map<String, Value>, prefix: &str, result: &mut FlatMessages) {
    for (key, value) in object {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(nested) => flatten_object(nested, &path, result),
            leaf => {
                result.insert(path, leaf.clone());
            }
        }
    }
}

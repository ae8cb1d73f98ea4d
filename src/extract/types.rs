use std::{collections::HashMap, fmt};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

/// Source context captured around a key occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyContext {
    /// Up to three lines before and after the match line, inclusive.
    pub surrounding: Vec<String>,
    /// Line number (1-indexed).
    pub line_number: usize,
    /// Nearest enclosing React component, if any.
    pub component: Option<String>,
    /// Nearest enclosing function or method, if any.
    pub function: Option<String>,
    /// Translator note from a preceding `/* i18n: ... */` comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One place in the source where a key is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub file: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Name of the call pattern that matched.
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<KeyContext>,
}

/// A translation key and everywhere it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationKey {
    pub key: String,
    /// The key itself; source calls carry no default text.
    pub default_value: String,
    pub files: Vec<Occurrence>,
    /// Pattern of the first occurrence.
    pub pattern: String,
    pub occurrences: usize,
}

impl TranslationKey {
    pub fn new(key: impl Into<String>, pattern: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            default_value: key.clone(),
            key,
            files: Vec::new(),
            pattern: pattern.into(),
            occurrences: 0,
        }
    }

    pub fn record(&mut self, occurrence: Occurrence) {
        self.occurrences += 1;
        self.files.push(occurrence);
    }

    /// Fold another record of the same key into this one.
    pub fn merge(&mut self, other: TranslationKey) {
        self.occurrences += other.occurrences;
        self.files.extend(other.files);
    }
}

/// Extracted keys in first-seen order.
///
/// Serializes as a JSON/YAML map from key to [`TranslationKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMap {
    entries: Vec<TranslationKey>,
    index: HashMap<String, usize>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&TranslationKey> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &TranslationKey> {
        self.entries.iter()
    }

    /// Get the entry for `key`, creating it with `pattern` if absent.
    pub fn entry(&mut self, key: &str, pattern: &str) -> &mut TranslationKey {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push(TranslationKey::new(key, pattern));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i]
    }

    /// Insert a key record, merging with an existing record of the same key.
    pub fn insert(&mut self, record: TranslationKey) {
        match self.index.get(&record.key) {
            Some(&i) => self.entries[i].merge(record),
            None => {
                self.index.insert(record.key.clone(), self.entries.len());
                self.entries.push(record);
            }
        }
    }

    /// Merge every record of `other` into this map.
    pub fn extend(&mut self, other: KeyMap) {
        for record in other.entries {
            self.insert(record);
        }
    }
}

impl IntoIterator for KeyMap {
    type Item = TranslationKey;
    type IntoIter = std::vec::IntoIter<TranslationKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for KeyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KeyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyMapVisitor;

        impl<'de> Visitor<'de> for KeyMapVisitor {
            type Value = KeyMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of translation keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<KeyMap, A::Error> {
                let mut keys = KeyMap::new();
                while let Some((_, record)) = access.next_entry::<String, TranslationKey>()? {
                    keys.insert(record);
                }
                Ok(keys)
            }
        }

        deserializer.deserialize_map(KeyMapVisitor)
    }
}

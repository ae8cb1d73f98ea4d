//! Translation key extraction from source files.
//!
//! Files are scanned with a fixed set of call-shape regexes
//! (see [`patterns::CALL_PATTERNS`]). Matches are filtered for sensitive-looking
//! keys, recorded with their file and line, and merged across files into a
//! [`KeyMap`].

pub mod context;
pub mod extractor;
pub mod files;
pub mod format;
pub mod patterns;
pub mod types;

pub use extractor::{
    Extraction, ExtractionStats, extract_keys_from_file, extract_keys_from_files,
    extract_keys_from_source,
};
pub use format::{FormatKeys, Formatter, KeyFormat};
pub use types::{KeyContext, KeyMap, Occurrence, TranslationKey};

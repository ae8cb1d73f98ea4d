//! lexi - translation key extraction and verification
//!
//! lexi scans TypeScript/JavaScript sources for translation calls, and checks
//! locale JSON files for completeness against a source locale.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing and commands)
//! - `config`: Configuration file loading and parsing
//! - `extract`: Key extraction from source files and output formats
//! - `verify`: Locale comparison, quality metrics and reports
//! - `logging`: Log subscriber setup and output marks
//! - `utils`: Shared utility functions

#[macro_use]
pub mod logging;

pub mod cli;
pub mod config;
pub mod extract;
pub mod utils;
pub mod verify;

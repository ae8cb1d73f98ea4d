//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan source files for translation keys
//! - `verify`: Check translation completeness across locales
//! - `init`: Initialize lexi configuration file

use std::path::PathBuf;

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};

use crate::{extract::KeyFormat, verify::ReportFormat};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag of the selected command.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(args)) => args.verbose,
            Some(Command::Verify(args)) => args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Files, directories or glob patterns to scan; a single non-source file
    /// is read as a list of entries
    #[arg(short, long, num_args = 1..)]
    pub files: Vec<String>,

    /// Write extracted keys to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = KeyFormat::Json)]
    pub format: KeyFormat,

    /// Record surrounding lines, component and function for each occurrence
    #[arg(long)]
    pub include_context: bool,

    /// Additional glob patterns to exclude
    #[arg(long, num_args = 1..)]
    pub exclude_patterns: Vec<String>,

    /// Log extraction statistics
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub stats: bool,

    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    /// Fail when critical keys are missing or completeness is below the threshold
    #[arg(long)]
    pub strict: bool,

    /// Write the report to this file
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,

    /// Minimum completeness percentage for strict mode (default: configured minimum)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Compare only critical keys across locales
    #[arg(long)]
    pub critical_only: bool,

    /// Enable verbose output; prints the report when no --report is given
    #[arg(short, long)]
    pub verbose: bool,

    /// Translations directory (overrides config file)
    #[arg(long)]
    pub translations_root: Option<String>,

    /// Source locale (overrides config file)
    #[arg(long)]
    pub source_locale: Option<String>,

    /// Target locales (overrides config file)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub locales: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation keys from source files
    Extract(ExtractArgs),
    /// Verify translation completeness across locales
    Verify(VerifyArgs),
    /// Initialize a new .lexirc.json configuration file
    Init,
}

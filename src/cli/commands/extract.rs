use std::{env, path::Path};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::super::{args::ExtractArgs, exit_status::ExitStatus};
use crate::{
    config::load_config,
    extract::{
        ExtractionStats, FormatKeys, extract_keys_from_files,
        files::{is_source_file, read_file_list},
    },
    utils::{now_rfc3339, write_output},
};

/// Expand `--files` into scan entries.
///
/// A single entry naming an existing non-source file is a list of entries,
/// one per line.
fn input_entries(cwd: &Path, files: Vec<String>) -> Result<Vec<String>> {
    if let [single] = files.as_slice() {
        let path = cwd.join(single);
        if path.is_file() && !is_source_file(&path) {
            debug!("Reading file list from {}", path.display());
            return read_file_list(&path);
        }
    }
    Ok(files)
}

pub fn extract(args: ExtractArgs) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd)?.config;

    let base_dir = match &args.source_root {
        Some(root) => cwd.join(root),
        None => config.source_dir(&cwd),
    };

    let entries = if args.files.is_empty() {
        config.includes.clone()
    } else {
        input_entries(&cwd, args.files)?
    };

    let mut excludes = config.excludes.clone();
    excludes.extend(args.exclude_patterns);

    info!("Extracting translation keys...");
    let extraction = extract_keys_from_files(&base_dir, &entries, &excludes, args.include_context);
    info!("Found {} unique translation keys", extraction.keys.len());

    if args.stats {
        ExtractionStats::from_keys(&extraction.keys).log();
    }

    let generated_at = now_rfc3339()?;
    let output = args
        .format
        .formatter(&generated_at)
        .format(&extraction.keys)?;

    match &args.output {
        Some(path) => {
            let path = cwd.join(path);
            write_output(&path, &output)?;
            success!("Keys written to {}", path.display());
        }
        None => println!("{}", output),
    }

    if extraction.keys.is_empty() {
        warn!("No translation keys found");
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

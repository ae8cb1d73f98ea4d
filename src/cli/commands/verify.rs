use std::env;

use anyhow::{Context, Result};
use tracing::{error, info};

use super::super::{args::VerifyArgs, exit_status::ExitStatus, report::print_summary};
use crate::{
    config::{Config, load_config},
    utils::{now_rfc3339, write_output},
    verify::{
        AnalysisOptions, Render, Report, analyze_translations, calculate_quality_metrics,
        strict_violations,
    },
};

/// Apply command-line overrides on top of the loaded config.
fn apply_overrides(config: &mut Config, args: &VerifyArgs) {
    if let Some(root) = &args.translations_root {
        config.translations_root = root.clone();
    }
    if let Some(locale) = &args.source_locale {
        config.source_locale = locale.clone();
    }
    if !args.locales.is_empty() {
        config.target_locales = args.locales.clone();
    }
}

pub fn verify(args: VerifyArgs) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let mut config = load_config(&cwd)?.config;
    apply_overrides(&mut config, &args);
    let threshold = args.threshold.unwrap_or(config.thresholds.minimum);

    let timestamp = now_rfc3339()?;
    let options = AnalysisOptions {
        critical_only: args.critical_only,
    };
    let Some(analysis) = analyze_translations(&cwd, &config, options, &timestamp)? else {
        error!("Analysis failed");
        return Ok(ExitStatus::Failure);
    };

    let metrics = calculate_quality_metrics(&analysis, &config.thresholds);
    let report = Report::new(analysis, metrics, &timestamp);
    let rendered = args.format.renderer().render(&report)?;

    let printed = match &args.report {
        Some(path) => {
            let path = cwd.join(path);
            write_output(&path, &rendered)?;
            success!("Report written to {}", path.display());
            false
        }
        None if args.verbose => {
            println!("{}", rendered);
            true
        }
        None => false,
    };
    if !printed {
        print_summary(&report);
    }

    info!(
        "Overall quality score: {:.1}%",
        report.quality_metrics.overall_score
    );

    if args.strict {
        let violations = strict_violations(&report.analysis, &report.quality_metrics, threshold);
        for violation in &violations {
            error!("{}", violation);
        }
        if !violations.is_empty() {
            return Ok(ExitStatus::Failure);
        }
    }

    success!("Translation verification completed");
    Ok(ExitStatus::Success)
}

//! Terminal summary of a verification run.
//!
//! Separate from the report renderers, which produce files; this is the
//! colored overview printed after `lexi verify`.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::{
    logging::{FAILURE_MARK, SUCCESS_MARK},
    verify::{LocaleStatus, Priority, Report},
};

/// Warning mark for locales that loaded but are incomplete.
const WARNING_MARK: &str = "!";

/// Print the verification summary to stdout.
pub fn print_summary(report: &Report) {
    print_summary_to(report, &mut io::stdout().lock());
}

/// Print the verification summary to a custom writer.
pub fn print_summary_to<W: Write>(report: &Report, writer: &mut W) {
    let summary = &report.analysis.summary;
    let metrics = &report.quality_metrics;

    let _ = writeln!(writer, "{}", "Translation Summary".bold());
    let _ = writeln!(
        writer,
        "  Total keys:      {} ({} critical)",
        summary.total_keys, summary.critical_keys
    );
    let _ = writeln!(
        writer,
        "  Completeness:    {}",
        score(metrics.completeness_score)
    );
    let _ = writeln!(writer, "  Critical score:  {}", score(metrics.critical_score));
    let _ = writeln!(writer, "  Overall score:   {}", score(metrics.overall_score));

    let name_width = report
        .analysis
        .details
        .keys()
        .map(|l| UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0);

    if !report.analysis.details.is_empty() {
        let _ = writeln!(writer);
    }
    for (locale, detail) in &report.analysis.details {
        let padding = " ".repeat(name_width - UnicodeWidthStr::width(locale.as_str()));
        match detail.status {
            LocaleStatus::Error => {
                let _ = writeln!(
                    writer,
                    "  {} {}{}  {}",
                    FAILURE_MARK.red(),
                    locale,
                    padding,
                    detail.error.as_deref().unwrap_or("error").red()
                );
            }
            status => {
                let mark = if status == LocaleStatus::Ok {
                    SUCCESS_MARK.green()
                } else {
                    WARNING_MARK.yellow()
                };
                let _ = write!(
                    writer,
                    "  {} {}{}  {:>6.1}%",
                    mark, locale, padding, detail.completeness
                );
                if !detail.missing.is_empty() {
                    let _ = write!(writer, "  {} missing", detail.missing.len());
                }
                if !detail.critical_missing.is_empty() {
                    let critical = format!("{} critical", detail.critical_missing.len());
                    let _ = write!(writer, ", {}", critical.red());
                }
                let _ = writeln!(writer);
            }
        }
    }

    if !metrics.recommendations.is_empty() {
        let _ = writeln!(writer, "\n{}", "Recommendations".bold());
        for rec in &metrics.recommendations {
            let label = format!("[{}]", rec.priority);
            let label = match rec.priority {
                Priority::Critical => label.red().bold(),
                Priority::High => label.yellow(),
                Priority::Low => label.dimmed(),
            };
            let _ = writeln!(writer, "  {} {}", label, rec.message);
        }
    }
}

fn score(value: f64) -> String {
    let text = format!("{:.1}%", value);
    if value >= 95.0 {
        text.green().to_string()
    } else if value >= 80.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

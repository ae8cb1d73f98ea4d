//! Verification report and its renderings.

use anyhow::{Context, Result};
use clap::ValueEnum;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::{
    analysis::{Analysis, LocaleDetail, LocaleStatus},
    metrics::QualityMetrics,
};

pub const GENERATOR: &str = concat!("lexi ", env!("CARGO_PKG_VERSION"));

/// Analysis results plus quality metrics, as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(flatten)]
    pub analysis: Analysis,
    pub quality_metrics: QualityMetrics,
    pub generated_at: String,
    pub generator: String,
}

impl Report {
    pub fn new(analysis: Analysis, quality_metrics: QualityMetrics, generated_at: &str) -> Self {
        Self {
            analysis,
            quality_metrics,
            generated_at: generated_at.to_string(),
            generator: GENERATOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Json,
    Html,
    Markdown,
    Csv,
}

impl ReportFormat {
    pub fn renderer(self) -> Renderer {
        match self {
            ReportFormat::Json => JsonRenderer.into(),
            ReportFormat::Html => HtmlRenderer.into(),
            ReportFormat::Markdown => MarkdownRenderer.into(),
            ReportFormat::Csv => CsvRenderer.into(),
        }
    }
}

#[enum_dispatch]
pub trait Render {
    fn render(&self, report: &Report) -> Result<String>;
}

#[enum_dispatch(Render)]
#[derive(Debug, Clone)]
pub enum Renderer {
    Json(JsonRenderer),
    Html(HtmlRenderer),
    Markdown(MarkdownRenderer),
    Csv(CsvRenderer),
}

/// Completeness cell: `N/A` for locales that failed to load.
fn completeness_cell(detail: &LocaleDetail) -> String {
    if detail.status == LocaleStatus::Error {
        "N/A".to_string()
    } else {
        format!("{:.1}%", detail.completeness)
    }
}

#[derive(Debug, Clone)]
pub struct JsonRenderer;

impl Render for JsonRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        serde_json::to_string_pretty(report).context("Failed to serialize report as JSON")
    }
}

#[derive(Debug, Clone)]
pub struct HtmlRenderer;

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const HTML_STYLE: &str = r#"        body { font-family: Arial, sans-serif; margin: 20px; }
        .header { background: #f5f5f5; padding: 20px; border-radius: 8px; }
        .metric { display: inline-block; margin: 10px; padding: 15px; background: #e3f2fd; border-radius: 4px; }
        .critical, .error { background: #ffebee; }
        .warning, .high, .incomplete { background: #fff3e0; }
        .success, .ok { background: #e8f5e8; }
        table { width: 100%; border-collapse: collapse; margin: 20px 0; }
        th, td { padding: 10px; text-align: left; border-bottom: 1px solid #ddd; }
        th { background-color: #f5f5f5; }"#;

impl Render for HtmlRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        let metrics = &report.quality_metrics;
        let summary = &report.analysis.summary;
        let completeness_class = if metrics.completeness_score >= 95.0 {
            "success"
        } else if metrics.completeness_score >= 80.0 {
            "warning"
        } else {
            "critical"
        };

        let rows: String = report
            .analysis
            .details
            .iter()
            .map(|(locale, detail)| {
                format!(
                    "            <tr>\n                <td>{}</td>\n                <td class=\"{}\">{}</td>\n                <td>{}</td>\n                <td>{}</td>\n                <td>{}</td>\n            </tr>\n",
                    escape_html(locale),
                    detail.status,
                    detail.status,
                    completeness_cell(detail),
                    detail.missing.len(),
                    detail.critical_missing.len()
                )
            })
            .collect();

        let recommendations = if metrics.recommendations.is_empty() {
            String::new()
        } else {
            let items: String = metrics
                .recommendations
                .iter()
                .map(|r| {
                    format!(
                        "        <li class=\"{}\">{}</li>\n",
                        r.priority,
                        escape_html(&r.message)
                    )
                })
                .collect();
            format!("    <h2>Recommendations</h2>\n    <ul>\n{}    </ul>\n", items)
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Translation Report</title>
    <style>
{style}
    </style>
</head>
<body>
    <div class="header">
        <h1>Translation Report</h1>
        <p>Generated: {generated_at}</p>
        <p>Overall Score: {overall:.1}%</p>
    </div>

    <h2>Summary</h2>
    <div class="metric">Total Keys: {total_keys}</div>
    <div class="metric">Critical Keys: {critical_keys}</div>
    <div class="metric {completeness_class}">Completeness: {completeness:.1}%</div>

    <h2>Locale Details</h2>
    <table>
        <thead>
            <tr>
                <th>Locale</th>
                <th>Status</th>
                <th>Completeness</th>
                <th>Missing Keys</th>
                <th>Critical Missing</th>
            </tr>
        </thead>
        <tbody>
{rows}        </tbody>
    </table>
{recommendations}</body>
</html>
"#,
            style = HTML_STYLE,
            generated_at = escape_html(&report.generated_at),
            overall = metrics.overall_score,
            total_keys = summary.total_keys,
            critical_keys = summary.critical_keys,
            completeness_class = completeness_class,
            completeness = metrics.completeness_score,
            rows = rows,
            recommendations = recommendations,
        ))
    }
}

#[derive(Debug, Clone)]
pub struct MarkdownRenderer;

/// Keep user text from breaking a Markdown table row.
fn escape_markdown_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

impl Render for MarkdownRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        let metrics = &report.quality_metrics;
        let summary = &report.analysis.summary;

        let mut md = String::from("# Translation Report\n\n");
        md.push_str(&format!("**Generated:** {}\n", report.generated_at));
        md.push_str(&format!("**Overall Score:** {:.1}%\n\n", metrics.overall_score));

        md.push_str("## Summary\n\n");
        md.push_str(&format!("- **Total Keys:** {}\n", summary.total_keys));
        md.push_str(&format!("- **Critical Keys:** {}\n", summary.critical_keys));
        md.push_str(&format!(
            "- **Completeness:** {:.1}%\n\n",
            metrics.completeness_score
        ));

        md.push_str("## Locale Details\n\n");
        md.push_str("| Locale | Status | Completeness | Missing | Critical Missing |\n");
        md.push_str("|--------|--------|--------------|---------|------------------|\n");
        for (locale, detail) in &report.analysis.details {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                escape_markdown_cell(locale),
                detail.status,
                completeness_cell(detail),
                detail.missing.len(),
                detail.critical_missing.len()
            ));
        }

        if !metrics.recommendations.is_empty() {
            md.push_str("\n## Recommendations\n\n");
            for rec in &metrics.recommendations {
                md.push_str(&format!(
                    "- **{}:** {}\n",
                    rec.priority.to_string().to_uppercase(),
                    escape_markdown_cell(&rec.message)
                ));
            }
        }

        Ok(md)
    }
}

#[derive(Debug, Clone)]
pub struct CsvRenderer;

impl Render for CsvRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        let mut csv =
            String::from("Locale,Status,Completeness,Missing Keys,Critical Missing,Total Keys\n");
        for (locale, detail) in &report.analysis.details {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                locale,
                detail.status,
                detail.completeness,
                detail.missing.len(),
                detail.critical_missing.len(),
                detail.total_keys
            ));
        }
        Ok(csv)
    }
}

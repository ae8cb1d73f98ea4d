//! Translation completeness verification.
//!
//! The source locale file is compared against every target locale and against
//! the keys actually used in code. The resulting [`Analysis`] is scored by
//! [`calculate_quality_metrics`] and rendered as a [`Report`].

pub mod analysis;
pub mod locale;
pub mod metrics;
pub mod report;

pub use analysis::{
    Analysis, AnalysisOptions, AnalysisSummary, ComplianceIssue, CriticalMatcher, LocaleDetail,
    LocaleStatus, analyze_translations, calculate_completeness,
};
pub use locale::{LocaleFile, flatten_object, load_locale_file};
pub use metrics::{Priority, QualityMetrics, Recommendation, calculate_quality_metrics};
pub use report::{Render, Renderer, Report, ReportFormat};

/// Reason a `--strict` run fails.
#[derive(Debug, Clone, PartialEq)]
pub enum StrictViolation {
    CriticalMissing { count: usize },
    BelowThreshold { score: f64, threshold: f64 },
}

impl std::fmt::Display for StrictViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrictViolation::CriticalMissing { count } => {
                write!(f, "Strict mode: {} critical keys are missing", count)
            }
            StrictViolation::BelowThreshold { score, threshold } => write!(
                f,
                "Strict mode: completeness {:.1}% is below threshold {}%",
                score, threshold
            ),
        }
    }
}

/// Collect every failed strict-mode gate: missing critical keys first, then
/// the completeness threshold.
pub fn strict_violations(
    analysis: &Analysis,
    metrics: &QualityMetrics,
    threshold: f64,
) -> Vec<StrictViolation> {
    let mut violations = Vec::new();
    if analysis.has_critical_missing() {
        violations.push(StrictViolation::CriticalMissing {
            count: analysis.critical_missing_count(),
        });
    }
    if metrics.completeness_score < threshold {
        violations.push(StrictViolation::BelowThreshold {
            score: metrics.completeness_score,
            threshold,
        });
    }
    violations
}

//! Quality scoring over an [`Analysis`].

use serde::{Deserialize, Serialize};

use super::analysis::{Analysis, ComplianceIssue, LocaleStatus};
use crate::config::Thresholds;

const COMPLETENESS_WEIGHT: f64 = 0.6;
const CRITICAL_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Critical => write!(f, "critical"),
            Priority::High => write!(f, "high"),
            Priority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Completeness,
    LocaleCompleteness,
    CriticalKeys,
    UnusedKeys,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub overall_score: f64,
    pub completeness_score: f64,
    pub critical_score: f64,
    pub recommendations: Vec<Recommendation>,
}

/// Mean completeness over the locales that loaded, 0 if none did.
fn completeness_score(analysis: &Analysis) -> f64 {
    let values = &analysis.summary.completeness;
    if values.is_empty() {
        0.0
    } else {
        values.values().sum::<f64>() / values.len() as f64
    }
}

/// Share of (critical key, target locale) pairs that are translated.
fn critical_score(analysis: &Analysis, critical_missing: usize) -> f64 {
    let expected = analysis.summary.critical_keys * analysis.target_locales.len();
    if expected == 0 {
        return 100.0;
    }
    expected.saturating_sub(critical_missing) as f64 / expected as f64 * 100.0
}

pub fn calculate_quality_metrics(analysis: &Analysis, thresholds: &Thresholds) -> QualityMetrics {
    let completeness_score = completeness_score(analysis);
    let critical_missing = analysis.critical_missing_count();
    let critical_score = critical_score(analysis, critical_missing);
    let overall_score = completeness_score * COMPLETENESS_WEIGHT + critical_score * CRITICAL_WEIGHT;

    let mut recommendations = Vec::new();

    if completeness_score < thresholds.target {
        recommendations.push(Recommendation {
            priority: Priority::High,
            kind: RecommendationKind::Completeness,
            message: format!(
                "Translation completeness below target ({:.1}% < {}%)",
                completeness_score, thresholds.target
            ),
        });
    }

    for (locale, detail) in &analysis.details {
        if detail.status != LocaleStatus::Error && detail.completeness < thresholds.minimum {
            recommendations.push(Recommendation {
                priority: Priority::High,
                kind: RecommendationKind::LocaleCompleteness,
                message: format!(
                    "Locale '{}' is below the minimum completeness ({:.1}% < {}%)",
                    locale, detail.completeness, thresholds.minimum
                ),
            });
        }
    }

    if critical_score < thresholds.critical && critical_missing > 0 {
        recommendations.push(Recommendation {
            priority: Priority::Critical,
            kind: RecommendationKind::CriticalKeys,
            message: format!("{} critical keys are missing translations", critical_missing),
        });
    }

    let unused = analysis.summary.issues.iter().find_map(|issue| match issue {
        ComplianceIssue::UnusedKeys { count, .. } => Some(*count),
        _ => None,
    });
    if let Some(count) = unused {
        recommendations.push(Recommendation {
            priority: Priority::Low,
            kind: RecommendationKind::UnusedKeys,
            message: format!("{} translation keys are not used in code", count),
        });
    }

    recommendations.sort_by_key(|r| r.priority);

    QualityMetrics {
        overall_score,
        completeness_score,
        critical_score,
        recommendations,
    }
}

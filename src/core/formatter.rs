use crate::domain::model::{ClassifierResult, EvaluationResponse, ViolationEntry};
use crate::domain::policy::POLICY_TYPES;

pub const SUMMARY_HIGH_QUALITY: &str = "this is a high quality and relevant review";
pub const SUMMARY_MEDIUM_QUALITY: &str = "this is a medium quality review";
pub const SUMMARY_LOW_QUALITY: &str = "review quality or relevancy is low";
pub const SUMMARY_ISSUES_PREFIX: &str = "review has the following issues: ";

const ISSUE_SEPARATOR: &str = ", ";

// 乘以 100 之後的浮點誤差先在第 9 位小數收斂，0.285 才會進位成 0.29
const PRE_ROUND_SCALE: f64 = 1e9;

fn round2(value: f64) -> f64 {
    let scaled = (value * 100.0 * PRE_ROUND_SCALE).round() / PRE_ROUND_SCALE;
    scaled.round() / 100.0
}

/// Maps raw classifier output onto the public response shape.
pub fn format(result: &ClassifierResult) -> EvaluationResponse {
    let violations: Vec<ViolationEntry> = POLICY_TYPES
        .iter()
        .map(|policy| ViolationEntry {
            policy_type: policy.display_name.to_string(),
            detected: result.is_violated(policy.key),
        })
        .collect();

    let violation_count = violations.iter().filter(|v| v.detected).count();

    EvaluationResponse {
        quality_score: round2(result.quality_score),
        relevancy_score: round2(result.relevancy_score),
        violations,
        summary: generate_summary(result, violation_count),
    }
}

/// Thresholds are checked against the unrounded scores.
fn generate_summary(result: &ClassifierResult, violation_count: usize) -> String {
    if violation_count == 0 {
        let (quality, relevancy) = (result.quality_score, result.relevancy_score);
        let summary = if quality >= 0.8 && relevancy >= 0.8 {
            SUMMARY_HIGH_QUALITY
        } else if quality >= 0.6 && relevancy >= 0.6 {
            SUMMARY_MEDIUM_QUALITY
        } else {
            SUMMARY_LOW_QUALITY
        };
        return summary.to_string();
    }

    let issues: Vec<&str> = POLICY_TYPES
        .iter()
        .filter(|policy| result.is_violated(policy.key))
        .map(|policy| policy.key.issue_phrase())
        .collect();

    format!("{}{}", SUMMARY_ISSUES_PREFIX, issues.join(ISSUE_SEPARATOR))
}

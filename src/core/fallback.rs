//! Rule-based stand-in for the classifier, used when the remote service
//! cannot be reached or returns something unusable.

use crate::domain::model::ClassifierResult;
use crate::domain::policy::PolicyKey;

const BASE_QUALITY_SCORE: f64 = 0.8;
const BASE_RELEVANCY_SCORE: f64 = 0.9;

const ADVERTISEMENT_PENALTY: f64 = 0.3;
const IRRELEVANT_PENALTY: f64 = 0.4;
const RANT_PENALTY: f64 = 0.2;

const ADVERTISEMENT_MARKERS: &[&str] = &["www.", "http", "优惠", "折扣"];
const IRRELEVANT_MARKERS: &[&str] = &["手机", "电脑", "无关"];
const RANT_WITHOUT_VISIT_MARKERS: &[&str] = &["没去过", "听说", "never been"];

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| text.contains(marker))
}

/// Scores `text` with fixed substring rules. Pure and deterministic.
pub fn score_locally(text: &str) -> ClassifierResult {
    let text_lower = text.to_lowercase();

    let has_ad = contains_any(&text_lower, ADVERTISEMENT_MARKERS);
    let is_irrelevant = contains_any(&text_lower, IRRELEVANT_MARKERS);
    let is_rant_without_visit = contains_any(&text_lower, RANT_WITHOUT_VISIT_MARKERS);

    let mut quality_score = BASE_QUALITY_SCORE;
    let mut relevancy_score = BASE_RELEVANCY_SCORE;

    if has_ad {
        quality_score -= ADVERTISEMENT_PENALTY;
    }
    if is_irrelevant {
        relevancy_score -= IRRELEVANT_PENALTY;
    }
    if is_rant_without_visit {
        quality_score -= RANT_PENALTY;
    }

    // 所有扣分完成後才夾住範圍
    ClassifierResult::new(quality_score.clamp(0.0, 1.0), relevancy_score.clamp(0.0, 1.0))
        .with_violation(PolicyKey::Advertisement, has_ad)
        .with_violation(PolicyKey::IrrelevantContent, is_irrelevant)
        .with_violation(PolicyKey::RantWithoutVisit, is_rant_without_visit)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_clean_review() {
        let result = score_locally("Great food, service was excellent");
        assert_eq!(result.quality_score, 0.8);
        assert_eq!(result.relevancy_score, 0.9);
        assert!(!result.is_violated(PolicyKey::Advertisement));
        assert!(!result.is_violated(PolicyKey::IrrelevantContent));
        assert!(!result.is_violated(PolicyKey::RantWithoutVisit));
        assert_eq!(result.policy_violations.len(), 3);
    }

    #[test]
    fn test_advertisement_case_insensitive() {
        for text in ["visit www.example.com", "Visit WWW.EXAMPLE.COM", "HTTPS://x.y"] {
            let result = score_locally(text);
            assert!(result.is_violated(PolicyKey::Advertisement), "{text}");
            assert_close(result.quality_score, 0.5);
            assert_close(result.relevancy_score, 0.9);
        }
    }

    #[test]
    fn test_chinese_markers() {
        let result = score_locally("Check out www.deals.com for 优惠!");
        assert!(result.is_violated(PolicyKey::Advertisement));
        assert!(!result.is_violated(PolicyKey::IrrelevantContent));
        assert_close(result.quality_score, 0.5);

        let result = score_locally("我想买一台新电脑");
        assert!(result.is_violated(PolicyKey::IrrelevantContent));
        assert_close(result.relevancy_score, 0.5);
        assert_close(result.quality_score, 0.8);

        let result = score_locally("听说这家店很难吃");
        assert!(result.is_violated(PolicyKey::RantWithoutVisit));
        assert_close(result.quality_score, 0.6);
    }

    #[test]
    fn test_penalties_stack() {
        let result = score_locally("I've never been there but www.rival.com is better");
        assert!(result.is_violated(PolicyKey::Advertisement));
        assert!(result.is_violated(PolicyKey::RantWithoutVisit));
        assert_close(result.quality_score, 0.3);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let fragments = ["", "www.", "手机", "never been", "http 优惠 电脑 听说"];
        for a in fragments {
            for b in fragments {
                let result = score_locally(&format!("{a} {b}"));
                assert!((0.0..=1.0).contains(&result.quality_score));
                assert!((0.0..=1.0).contains(&result.relevancy_score));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "没去过 but 折扣 at http://shop";
        assert_eq!(score_locally(text), score_locally(text));
    }
}

use crate::domain::policy::PolicyKey;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Opaque location data forwarded to the classifier untouched.
pub type LocationMetadata = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRequest {
    /// Already trimmed and length-checked.
    pub review_text: String,
    pub location_metadata: LocationMetadata,
}

/// Raw classifier output. Missing or null fields read as zero / false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResult {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub quality_score: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub relevancy_score: f64,
    #[serde(default, deserialize_with = "lenient_flags")]
    pub policy_violations: BTreeMap<String, bool>,
}

impl ClassifierResult {
    pub fn new(quality_score: f64, relevancy_score: f64) -> Self {
        Self {
            quality_score,
            relevancy_score,
            policy_violations: BTreeMap::new(),
        }
    }

    pub fn with_violation(mut self, key: PolicyKey, detected: bool) -> Self {
        self.policy_violations
            .insert(key.as_str().to_string(), detected);
        self
    }

    pub fn is_violated(&self, key: PolicyKey) -> bool {
        self.policy_violations
            .get(key.as_str())
            .copied()
            .unwrap_or(false)
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn lenient_flags<'de, D>(deserializer: D) -> Result<BTreeMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<bool>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, flag)| flag.map(|detected| (key, detected)))
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationEntry {
    pub policy_type: String,
    pub detected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub quality_score: f64,
    pub relevancy_score: f64,
    pub violations: Vec<ViolationEntry>,
    pub summary: String,
}

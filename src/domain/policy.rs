use serde::{Deserialize, Serialize};
use std::fmt;

/// Content rules a review is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKey {
    Advertisement,
    IrrelevantContent,
    RantWithoutVisit,
}

impl PolicyKey {
    /// Key used on the classifier wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advertisement => "advertisement",
            Self::IrrelevantContent => "irrelevant_content",
            Self::RantWithoutVisit => "rant_without_visit",
        }
    }

    /// Phrase used in the summary when this policy is violated.
    pub fn issue_phrase(&self) -> &'static str {
        match self {
            Self::Advertisement => "contains advertising content",
            Self::IrrelevantContent => "content is irrelevant",
            Self::RantWithoutVisit => "likely a complaint about a location not actually visited",
        }
    }
}

impl fmt::Display for PolicyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyType {
    pub key: PolicyKey,
    pub display_name: &'static str,
}

/// 順序決定回應中 violations 陣列的順序
pub const POLICY_TYPES: [PolicyType; 3] = [
    PolicyType {
        key: PolicyKey::Advertisement,
        display_name: "No Advertisement",
    },
    PolicyType {
        key: PolicyKey::IrrelevantContent,
        display_name: "No Irrelevant Content",
    },
    PolicyType {
        key: PolicyKey::RantWithoutVisit,
        display_name: "No Rant Without Visit",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_order() {
        let keys: Vec<&str> = POLICY_TYPES.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["advertisement", "irrelevant_content", "rant_without_visit"]
        );
    }

    #[test]
    fn test_wire_names_match_serde() {
        for policy in POLICY_TYPES {
            let encoded = serde_json::to_value(policy.key).unwrap();
            assert_eq!(encoded, serde_json::Value::String(policy.key.to_string()));
        }
    }
}

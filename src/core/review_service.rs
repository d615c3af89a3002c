use crate::config::ServiceConfig;
use crate::core::classifier::ClassifierClient;
use crate::core::formatter;
use crate::domain::model::{EvaluationRequest, EvaluationResponse, LocationMetadata};
use crate::domain::ports::Classifier;
use crate::utils::error::{ReviewError, Result};
use crate::utils::validation::{validate_max_length, validate_required_fields};
use serde_json::Value;

const REQUIRED_FIELDS: &[&str] = &["review_text"];

pub struct ReviewService<C: Classifier> {
    classifier: ClassifierClient<C>,
    max_review_length: usize,
}

impl<C: Classifier> ReviewService<C> {
    pub fn new(classifier: ClassifierClient<C>, config: &ServiceConfig) -> Self {
        Self {
            classifier,
            max_review_length: config.max_review_length,
        }
    }

    /// Evaluates a raw `POST /api/evaluate-review` body.
    pub async fn evaluate(&self, body: &[u8]) -> Result<EvaluationResponse> {
        let request = parse_request(body, self.max_review_length)?;
        Ok(self.evaluate_request(&request).await)
    }

    pub async fn evaluate_request(&self, request: &EvaluationRequest) -> EvaluationResponse {
        tracing::info!(
            "Starting review evaluation, length: {}",
            request.review_text.chars().count()
        );

        let result = self
            .classifier
            .classify(&request.review_text, &request.location_metadata)
            .await;
        let response = formatter::format(&result);

        tracing::info!("Review evaluation complete");
        response
    }
}

/// 解析並驗證請求內容
pub fn parse_request(body: &[u8], max_review_length: usize) -> Result<EvaluationRequest> {
    let data: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(body)?
    };

    validate_required_fields(&data, REQUIRED_FIELDS)?;

    let review_text = match data.get("review_text") {
        Some(Value::String(text)) => text.trim().to_string(),
        _ => return Err(ReviewError::validation("review_text must be a string")),
    };

    validate_max_length("Review text", &review_text, max_review_length)?;

    if review_text.is_empty() {
        return Err(ReviewError::validation("Review text cannot be empty"));
    }

    let location_metadata = match data.get("location_metadata") {
        None | Some(Value::Null) => LocationMetadata::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return Err(ReviewError::validation(
                "location_metadata must be an object",
            ))
        }
    };

    Ok(EvaluationRequest {
        review_text,
        location_metadata,
    })
}

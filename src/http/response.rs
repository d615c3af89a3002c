use crate::domain::model::EvaluationResponse;
use crate::utils::error::{ErrorCategory, ReviewError};
use crate::utils::time::timestamp;
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const NOT_FOUND_MESSAGE: &str = "Requested API endpoint does not exist";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error, please try again later";

/// JSON body shared by every reply; `status` is either `success` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<EvaluationResponse>,
        message: String,
        timestamp: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
    },
    Error {
        message: String,
        timestamp: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Envelope>,
}

impl ApiResponse {
    pub fn success(data: EvaluationResponse, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(Envelope::Success {
                data: Some(data),
                message: message.into(),
                timestamp: timestamp(),
                version: None,
            }),
        }
    }

    pub fn health(message: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(Envelope::Success {
                data: None,
                message: message.into(),
                timestamp: timestamp(),
                version: Some(version.into()),
            }),
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(Envelope::Error {
                message: message.into(),
                timestamp: timestamp(),
                path: None,
                method: None,
            }),
        }
    }

    pub fn not_found(method: &Method, path: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: Some(Envelope::Error {
                message: NOT_FOUND_MESSAGE.to_string(),
                timestamp: timestamp(),
                path: Some(path.to_string()),
                method: Some(method.to_string()),
            }),
        }
    }

    /// Status line only, no body.
    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    /// 驗證錯誤回 400 並帶出訊息，其餘一律 500 且不洩漏細節
    pub fn from_error(err: &ReviewError) -> Self {
        match err.category() {
            ErrorCategory::Validation => Self::error(StatusCode::BAD_REQUEST, err.user_message()),
            _ => Self::error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self.body {
            Some(envelope) => (self.status, Json(envelope)).into_response(),
            None => self.status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_envelope_shape() {
        let response = ApiResponse::not_found(&Method::GET, "/api/nonexistent");
        let body = serde_json::to_value(response.body.unwrap()).unwrap();

        assert_eq!(body["status"], json!("error"));
        assert_eq!(body["message"], json!(NOT_FOUND_MESSAGE));
        assert_eq!(body["path"], json!("/api/nonexistent"));
        assert_eq!(body["method"], json!("GET"));
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_health_envelope_has_no_data() {
        let body = serde_json::to_value(ApiResponse::health("ok", "1.0.0").body.unwrap()).unwrap();
        assert_eq!(body["status"], json!("success"));
        assert_eq!(body["version"], json!("1.0.0"));
        assert!(body.get("data").is_none());
        assert!(body.get("path").is_none());
    }

    #[test]
    fn test_from_error_status_mapping() {
        let response = ApiResponse::from_error(&ReviewError::validation("Review text cannot be empty"));
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(matches!(
            response.body,
            Some(Envelope::Error { ref message, .. }) if message == "Review text cannot be empty"
        ));

        let response = ApiResponse::from_error(&ReviewError::internal("socket closed"));
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(
            response.body,
            Some(Envelope::Error { ref message, .. }) if message == INTERNAL_ERROR_MESSAGE
        ));
    }
}

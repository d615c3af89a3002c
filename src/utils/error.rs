use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 下游分類服務的失敗種類，全部由 fallback 評分器吸收，不會轉成 `ReviewError`
#[derive(Error, Debug)]
pub enum DownstreamError {
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("transport failure calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response body: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}

impl ReviewError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::InternalError { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// 給呼叫端看的訊息；只有驗證錯誤會帶出細節
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => self.to_string(),
            _ => "Internal server error, please try again later".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            ReviewError::validation("bad").category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            ReviewError::internal("boom").category(),
            ErrorCategory::Internal
        );

        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            ReviewError::from(parse_err).category(),
            ErrorCategory::Internal
        );

        let config_err = ReviewError::ConfigError {
            message: "missing [server] section".to_string(),
        };
        assert_eq!(config_err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_user_message_hides_internal_detail() {
        let err = ReviewError::internal("database password is hunter2");
        assert!(!err.user_message().contains("hunter2"));

        let err = ReviewError::validation("Missing required fields: review_text");
        assert_eq!(err.user_message(), "Missing required fields: review_text");
    }
}

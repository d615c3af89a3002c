pub mod toml_config;

use crate::utils::error::{Result, ReviewError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_VERSION: &str = "1.0.0";
pub const DEFAULT_ML_SERVICE_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_ML_PREDICT_ENDPOINT: &str = "/ml-api/predict";
pub const DEFAULT_ML_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_REVIEW_LENGTH: usize = 5000;

const MAX_ML_TIMEOUT_SECONDS: u64 = 600;

pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;
// JSON 逸出後每個字元最多 12 bytes（代理對 \uXXXX\uXXXX）
const MAX_ESCAPED_BYTES_PER_CHAR: usize = 12;
const METADATA_ALLOWANCE_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Runtime configuration. Built once at start-up and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub api_version: String,
    pub ml_service_base_url: String,
    pub ml_predict_endpoint: String,
    pub ml_timeout_seconds: u64,
    pub max_review_length: usize,
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_version: DEFAULT_API_VERSION.to_string(),
            ml_service_base_url: DEFAULT_ML_SERVICE_BASE_URL.to_string(),
            ml_predict_endpoint: DEFAULT_ML_PREDICT_ENDPOINT.to_string(),
            ml_timeout_seconds: DEFAULT_ML_TIMEOUT_SECONDS,
            max_review_length: DEFAULT_MAX_REVIEW_LENGTH,
            log_format: LogFormat::default(),
        }
    }
}

impl ServiceConfig {
    /// 分類服務完整 URL
    pub fn ml_service_url(&self) -> String {
        format!(
            "{}{}",
            self.ml_service_base_url.trim_end_matches('/'),
            self.ml_predict_endpoint
        )
    }

    pub fn ml_timeout(&self) -> Duration {
        Duration::from_secs(self.ml_timeout_seconds)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Request body size cap. Never below what a maximum-length review can
    /// take on the wire.
    pub fn max_body_bytes(&self) -> usize {
        self.max_review_length
            .saturating_mul(MAX_ESCAPED_BYTES_PER_CHAR)
            .saturating_add(METADATA_ALLOWANCE_BYTES)
            .max(DEFAULT_MAX_BODY_BYTES)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_non_empty_string("server.api_version", &self.api_version)?;
        validate_url("classifier.base_url", &self.ml_service_base_url)?;

        if !self.ml_predict_endpoint.starts_with('/') {
            return Err(ReviewError::InvalidConfigValueError {
                field: "classifier.predict_endpoint".to_string(),
                value: self.ml_predict_endpoint.clone(),
                reason: "Endpoint must start with '/'".to_string(),
            });
        }

        validate_range(
            "classifier.timeout_seconds",
            self.ml_timeout_seconds,
            1,
            MAX_ML_TIMEOUT_SECONDS,
        )?;
        validate_positive_number("limits.max_review_length", self.max_review_length, 1)?;

        tracing::debug!("✅ Service configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "review-assessor")]
#[command(about = "Review quality and policy assessment API")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Base URL of the text classification service")]
    pub ml_service_url: Option<String>,

    #[arg(long, help = "Classifier request timeout in seconds")]
    pub ml_timeout: Option<u64>,

    #[arg(long)]
    pub max_review_length: Option<usize>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 預設值 < TOML 檔案 < 命令列參數
    pub fn resolve(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => toml_config::TomlConfig::from_file(path)?.into_service_config(),
            None => ServiceConfig::default(),
        };

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(url) = &self.ml_service_url {
            config.ml_service_base_url = url.clone();
        }
        if let Some(timeout) = self.ml_timeout {
            config.ml_timeout_seconds = timeout;
        }
        if let Some(max_length) = self.max_review_length {
            config.max_review_length = max_length;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }

        Ok(config)
    }
}

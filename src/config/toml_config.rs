use crate::config::{LogFormat, ServiceConfig};
use crate::utils::error::{ReviewError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerConfig>,
    pub classifier: Option<ClassifierConfig>,
    pub limits: Option<LimitsConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub base_url: Option<String>,
    pub predict_endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_review_length: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReviewError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReviewError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ML_SERVICE_URL})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReviewError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Applies the file's values over the built-in defaults.
    pub fn into_service_config(self) -> ServiceConfig {
        let mut config = ServiceConfig::default();

        if let Some(server) = self.server {
            if let Some(host) = server.host {
                config.host = host;
            }
            if let Some(port) = server.port {
                config.port = port;
            }
            if let Some(version) = server.api_version {
                config.api_version = version;
            }
        }

        if let Some(classifier) = self.classifier {
            if let Some(base_url) = classifier.base_url {
                config.ml_service_base_url = base_url;
            }
            if let Some(endpoint) = classifier.predict_endpoint {
                config.ml_predict_endpoint = endpoint;
            }
            if let Some(timeout) = classifier.timeout_seconds {
                config.ml_timeout_seconds = timeout;
            }
        }

        if let Some(max_length) = self.limits.and_then(|l| l.max_review_length) {
            config.max_review_length = max_length;
        }

        if let Some(format) = self.logging.and_then(|l| l.format) {
            config.log_format = format;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ML_PREDICT_ENDPOINT;

    #[test]
    fn test_full_file() {
        let content = r#"
[server]
host = "127.0.0.1"
port = 9090
api_version = "2.1.0"

[classifier]
base_url = "http://ml.internal:5000"
predict_endpoint = "/v2/predict"
timeout_seconds = 10

[limits]
max_review_length = 2000

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(content)
            .unwrap()
            .into_service_config();

        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.api_version, "2.1.0");
        assert_eq!(config.ml_service_url(), "http://ml.internal:5000/v2/predict");
        assert_eq!(config.ml_timeout_seconds, 10);
        assert_eq!(config.max_review_length, 2000);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = TomlConfig::from_toml_str("[classifier]\ntimeout_seconds = 3\n")
            .unwrap()
            .into_service_config();

        assert_eq!(config.ml_timeout_seconds, 3);
        assert_eq!(config.ml_predict_endpoint, DEFAULT_ML_PREDICT_ENDPOINT);
        assert_eq!(config, ServiceConfig {
            ml_timeout_seconds: 3,
            ..ServiceConfig::default()
        });
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("REVIEW_ASSESSOR_TEST_ML_URL", "http://from-env:5000");
        let content = r#"
[classifier]
base_url = "${REVIEW_ASSESSOR_TEST_ML_URL}"
"#;
        let config = TomlConfig::from_toml_str(content)
            .unwrap()
            .into_service_config();
        assert_eq!(config.ml_service_base_url, "http://from-env:5000");
    }

    #[test]
    fn test_unknown_env_var_left_verbatim() {
        let content = r#"
[classifier]
base_url = "${REVIEW_ASSESSOR_TEST_UNSET_VARIABLE}"
"#;
        let config = TomlConfig::from_toml_str(content)
            .unwrap()
            .into_service_config();
        assert_eq!(
            config.ml_service_base_url,
            "${REVIEW_ASSESSOR_TEST_UNSET_VARIABLE}"
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert!(matches!(err, ReviewError::ConfigError { .. }));
    }
}

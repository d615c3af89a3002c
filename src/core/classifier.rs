use crate::config::ServiceConfig;
use crate::core::fallback;
use crate::domain::model::{ClassifierResult, LocationMetadata};
use crate::domain::ports::Classifier;
use crate::utils::error::{DownstreamError, Result, ReviewError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
    metadata: &'a LocationMetadata,
}

/// Calls the classification service over HTTP with a bounded timeout.
pub struct HttpClassifier {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpClassifier {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Self::with_timeout(config.ml_service_url(), config.ml_timeout())
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReviewError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> DownstreamError {
        if err.is_timeout() {
            DownstreamError::Timeout {
                url: self.url.clone(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            DownstreamError::Transport {
                url: self.url.clone(),
                source: err,
            }
        }
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn predict(
        &self,
        text: &str,
        metadata: &LocationMetadata,
    ) -> std::result::Result<ClassifierResult, DownstreamError> {
        tracing::debug!("Calling classifier: {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&PredictRequest { text, metadata })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        tracing::debug!("Classifier response status: {}", status);

        if !status.is_success() {
            return Err(DownstreamError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&body).map_err(DownstreamError::MalformedResponse)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

/// Remote classification with a local fallback. `classify` never fails.
pub struct ClassifierClient<C: Classifier> {
    remote: C,
}

impl<C: Classifier> ClassifierClient<C> {
    pub fn new(remote: C) -> Self {
        Self { remote }
    }

    pub async fn classify(&self, text: &str, metadata: &LocationMetadata) -> ClassifierResult {
        match self.remote.predict(text, metadata).await {
            Ok(result) => {
                tracing::info!("✅ Classifier responded from {}", self.remote.endpoint());
                result
            }
            Err(err) => {
                let reason = match &err {
                    DownstreamError::Timeout { .. } => "timeout",
                    DownstreamError::Transport { .. } => "transport",
                    DownstreamError::Status { .. } => "status",
                    DownstreamError::MalformedResponse(_) => "malformed response",
                };
                tracing::warn!(
                    "⚠️ Classifier unavailable ({}): {}; using local fallback scorer",
                    reason,
                    err
                );
                fallback::score_locally(text)
            }
        }
    }
}

use crate::domain::model::{ClassifierResult, LocationMetadata};
use crate::utils::error::DownstreamError;
use async_trait::async_trait;

/// Remote text classifier. Implementations report every failure as a
/// [`DownstreamError`] so the caller can decide to fall back.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn predict(
        &self,
        text: &str,
        metadata: &LocationMetadata,
    ) -> std::result::Result<ClassifierResult, DownstreamError>;

    fn endpoint(&self) -> &str;
}

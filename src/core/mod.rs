pub mod classifier;
pub mod fallback;
pub mod formatter;
pub mod review_service;

pub use crate::domain::model::{ClassifierResult, EvaluationRequest, EvaluationResponse};
pub use crate::domain::ports::Classifier;
pub use crate::utils::error::Result;

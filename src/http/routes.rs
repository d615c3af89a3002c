use crate::config::ServiceConfig;
use crate::core::review_service::ReviewService;
use crate::domain::ports::Classifier;
use crate::http::response::ApiResponse;
use crate::http::router::{RouteRequest, Router};
use crate::utils::error::Result;
use axum::http::Method;
use std::sync::Arc;

pub const EVALUATE_REVIEW_PATH: &str = "/api/evaluate-review";
pub const HEALTH_PATH: &str = "/api/health";

pub const EVALUATION_SUCCESS_MESSAGE: &str = "Review evaluated successfully";
pub const HEALTH_MESSAGE: &str = "API service is running normally";

/// Builds the API route table.
pub fn build_router<C: Classifier + 'static>(
    service: Arc<ReviewService<C>>,
    config: &ServiceConfig,
) -> Router {
    let mut router = Router::new();

    router.add_route(Method::POST, EVALUATE_REVIEW_PATH, move |request| {
        evaluate_review(Arc::clone(&service), request)
    });

    let version = config.api_version.clone();
    router.add_route(Method::GET, HEALTH_PATH, move |_| health(version.clone()));

    router
}

async fn evaluate_review<C: Classifier>(
    service: Arc<ReviewService<C>>,
    request: RouteRequest,
) -> Result<ApiResponse> {
    let evaluation = service.evaluate(&request.body).await?;
    Ok(ApiResponse::success(evaluation, EVALUATION_SUCCESS_MESSAGE))
}

async fn health(version: String) -> Result<ApiResponse> {
    Ok(ApiResponse::health(HEALTH_MESSAGE, version))
}

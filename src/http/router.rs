//! Exact-match route table.
//!
//! Routes are matched on `(method, path)` in registration order, first match
//! wins. No wildcards and no path parameters. Handler errors are turned into
//! error envelopes here so handlers can simply use `?`.

use crate::http::response::ApiResponse;
use crate::utils::error::{ErrorCategory, Result};
use axum::body::Bytes;
use axum::http::Method;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub method: Method,
    /// Path only, without the query string.
    pub path: String,
    pub body: Bytes,
}

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send>>;
pub type Handler = Arc<dyn Fn(RouteRequest) -> HandlerFuture + Send + Sync>;

struct Route {
    method: Method,
    path: String,
    handler: Handler,
}

impl Route {
    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == *method && self.path == path
    }
}

#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route<F, Fut>(&mut self, method: Method, path: impl Into<String>, handler: F)
    where
        F: Fn(RouteRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse>> + Send + 'static,
    {
        let handler: Handler =
            Arc::new(move |request| -> HandlerFuture { Box::pin(handler(request)) });
        self.routes.push(Route {
            method,
            path: path.into(),
            handler,
        });
    }

    /// Registered `(method, path)` pairs in registration order.
    pub fn routes(&self) -> Vec<(Method, String)> {
        self.routes
            .iter()
            .map(|route| (route.method.clone(), route.path.clone()))
            .collect()
    }

    pub async fn dispatch(&self, request: RouteRequest) -> ApiResponse {
        let method = request.method.clone();
        let path = request.path.clone();

        tracing::info!("Handling request: {} {}", method, path);

        let Some(route) = self.routes.iter().find(|r| r.matches(&method, &path)) else {
            tracing::warn!("Route not found: {} {}", method, path);
            return ApiResponse::not_found(&method, &path);
        };

        match (route.handler)(request).await {
            Ok(response) => {
                tracing::info!("Request handled successfully: {} {}", method, path);
                response
            }
            Err(err) => {
                if err.category() == ErrorCategory::Validation {
                    tracing::warn!("Request rejected: {} {} - {}", method, path, err);
                } else {
                    tracing::error!("Request failed: {} {} - {:?}", method, path, err);
                }
                ApiResponse::from_error(&err)
            }
        }
    }
}

//! HTTP server using Axum
//!
//! Every request goes through a single fallback handler into the crate's own
//! [`Router`], so the exact-match route table is the only routing logic.
//! `OPTIONS` on any path answers 200 with an empty body. Bodies over the
//! configured size cap get a 400 error envelope instead of axum's plain 413.

use crate::config::ServiceConfig;
use crate::http::response::ApiResponse;
use crate::http::router::{RouteRequest, Router};
use crate::utils::error::{Result, ReviewError};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct ServerState {
    router: Arc<Router>,
    body_limit: usize,
}

pub struct HttpServer {
    listener: TcpListener,
    router: Arc<Router>,
    body_limit: usize,
    cancel_token: CancellationToken,
}

impl HttpServer {
    pub fn new(
        listener: TcpListener,
        router: Router,
        config: &ServiceConfig,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            listener,
            router: Arc::new(router),
            body_limit: config.max_body_bytes(),
            cancel_token,
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until the cancellation token fires.
    pub async fn run(self) -> Result<()> {
        let address = self.local_addr()?;
        let app = app(self.router, self.body_limit);

        tracing::info!("🚀 HTTP server listening on {}", address);
        tracing::debug!("Request body limit: {} bytes", self.body_limit);

        let cancel_token = self.cancel_token;
        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                cancel_token.cancelled().await;
                tracing::info!("HTTP server shutting down gracefully");
            })
            .await?;

        Ok(())
    }
}

/// Axum application wrapping the route table with CORS and request tracing.
pub fn app(router: Arc<Router>, body_limit: usize) -> axum::Router {
    axum::Router::new()
        .fallback(handle_request)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(ServerState { router, body_limit })
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn handle_request(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    // 預檢請求
    if method == Method::OPTIONS {
        return ApiResponse::empty(StatusCode::OK).into_response();
    }

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            return body_rejected(&method, uri.path(), &rejection, state.body_limit)
                .into_response();
        }
    };

    let request = RouteRequest {
        method,
        path: uri.path().to_string(),
        body,
    };

    state.router.dispatch(request).await.into_response()
}

fn body_rejected(
    method: &Method,
    path: &str,
    rejection: &BytesRejection,
    body_limit: usize,
) -> ApiResponse {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(
            "Request rejected: {} {} - body exceeds {} bytes",
            method,
            path,
            body_limit
        );
        return ApiResponse::from_error(&ReviewError::validation(format!(
            "Request body exceeds maximum size of {} bytes",
            body_limit
        )));
    }

    tracing::error!(
        "Failed to read request body: {} {} - {}",
        method,
        path,
        rejection.body_text()
    );
    ApiResponse::from_error(&ReviewError::internal(rejection.body_text()))
}

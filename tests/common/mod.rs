#![allow(dead_code)]

use review_assessor::{
    build_router, ClassifierClient, HttpClassifier, HttpServer, ReviewService, ServiceConfig,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Nothing listens on this port, so connections are refused immediately.
pub const UNREACHABLE_CLASSIFIER: &str = "http://127.0.0.1:1";

pub struct TestServer {
    pub base_url: String,
    cancel_token: CancellationToken,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

pub fn test_config(ml_service_base_url: &str) -> ServiceConfig {
    ServiceConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ml_service_base_url: ml_service_base_url.to_string(),
        ml_timeout_seconds: 2,
        ..ServiceConfig::default()
    }
}

/// Starts the API on an ephemeral port, talking to the given classifier.
pub async fn spawn_server(config: ServiceConfig) -> anyhow::Result<TestServer> {
    let classifier = ClassifierClient::new(HttpClassifier::new(&config)?);
    let service = Arc::new(ReviewService::new(classifier, &config));
    let router = build_router(service, &config);

    let listener = TcpListener::bind(config.bind_address()).await?;
    let cancel_token = CancellationToken::new();
    let server = HttpServer::new(listener, router, &config, cancel_token.clone());
    let address = server.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = server.run().await {
            eprintln!("test server error: {}", e);
        }
    });

    Ok(TestServer {
        base_url: format!("http://{}", address),
        cancel_token,
    })
}

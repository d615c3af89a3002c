use clap::Parser;
use review_assessor::utils::{logger, validation::Validate};
use review_assessor::{
    build_router, CliConfig, ClassifierClient, HttpClassifier, HttpServer, ReviewService,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(cli.verbose, config.log_format);

    tracing::info!("Starting review-assessor v{}", config.api_version);
    tracing::debug!("Service config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_message());
        std::process::exit(1);
    }

    tracing::info!(
        "Classifier endpoint: {} (timeout {}s)",
        config.ml_service_url(),
        config.ml_timeout_seconds
    );

    let classifier = ClassifierClient::new(HttpClassifier::new(&config)?);
    let service = Arc::new(ReviewService::new(classifier, &config));
    let router = build_router(service, &config);
    for (method, path) in router.routes() {
        tracing::info!("Registered route: {} {}", method, path);
    }

    let listener = TcpListener::bind(config.bind_address()).await?;

    let cancel_token = CancellationToken::new();
    let shutdown = cancel_token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => shutdown.cancel(),
            Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
        }
    });

    HttpServer::new(listener, router, &config, cancel_token).run().await?;

    tracing::info!("✅ Server stopped");
    Ok(())
}

use quake_damage_predictor::{
    api::{build_router, AppState},
    artifacts::{ArtifactBundle, FsArtifactStore},
    config::Config,
    pipeline::Predictor,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quake_damage_predictor=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;

    tracing::info!(
        "Starting {} v{}",
        config.observability.service_name,
        env!("CARGO_PKG_VERSION")
    );

    // Load artifacts once; the bundle is immutable and shared by reference
    // for the lifetime of the process.
    tracing::info!(dir = %config.artifacts.dir.display(), "Loading artifacts");
    let store = FsArtifactStore::new(&config.artifacts.dir);
    let bundle = Arc::new(ArtifactBundle::load(&store, &config.artifacts)?);

    let predictor = Arc::new(Predictor::new(bundle));
    let state = AppState::new(predictor, config.model.reported_accuracy);

    // Build HTTP router
    let app = build_router(state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Prediction:   http://{}/v1/predict", http_addr);
    tracing::info!("   Form page:    http://{}/", http_addr);

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tokio::select! {
        _ = server => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}

//! SentinelFi document agent server
//!
//! Main entry point for the budget drafting service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sentinel_api::{AppState, create_router};
use sentinel_core::draft::DraftService;
use sentinel_partition::Partitioner;
use sentinel_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Create partitioner
    let partitioner = Partitioner::from_config(&config.partitioner)
        .context("Failed to configure document partitioner")?;
    info!(
        partitioner = partitioner.name(),
        url = config.partitioner.url.as_deref().unwrap_or("-"),
        strategy = %config.partitioner.strategy,
        "Document partitioner configured"
    );

    let drafts = DraftService::new(Arc::new(partitioner), config.upload.max_file_size);

    // Create JWT service when a secret is configured
    let jwt_service = config.jwt.as_ref().map(|jwt| {
        Arc::new(JwtService::new(JwtConfig {
            secret: jwt.secret.clone(),
            access_token_expiry_secs: i64::try_from(jwt.access_token_expiry_secs)
                .unwrap_or(i64::MAX),
        }))
    });
    info!(enabled = jwt_service.is_some(), "Authentication configured");

    // Create application state
    let state = AppState {
        drafts: Arc::new(drafts),
        jwt_service,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(
        max_file_size = config.upload.max_file_size,
        "Server listening on {}", addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Human-readable logs by default, JSON lines with `LOG_FORMAT=json`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sentinel=debug,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

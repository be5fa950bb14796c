use shrimp::{build_router, AppError, AppState, HeartbeatScheduler, PresenceHub, ServerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shrimp=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    config.validate()?;

    info!(
        default_room = %config.default_room,
        heartbeat_interval_ms = config.heartbeat.interval.as_millis() as u64,
        "Starting shrimp presence server"
    );

    // Single in-memory authority shared by the gateway and the heartbeat
    let hub = PresenceHub::new(config.default_room.clone());
    let heartbeat = HeartbeatScheduler::new(hub.clone(), config.heartbeat.clone()).start();

    let app = build_router(AppState::new(hub));

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!(address = %config.socket_addr(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    heartbeat.cancel().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

//! Segmenter - segment assignment service
//!
//! Connects to PostgreSQL once at startup, serves the HTTP API until Ctrl-C
//! or SIGTERM, then drains in-flight requests and closes the pool.

use anyhow::Result;
use segmenter_api::{config::AppConfig, routes, telemetry, AppState};
use segmenter_domain::segment::SegmentService;
use segmenter_postgres::PgSegmentStore;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    telemetry::init_tracing(config.env);

    info!(env = %config.env, "Starting Segmenter API");

    let store = match PgSegmentStore::connect(&config.db).await {
        Ok(store) => store,
        Err(err) => {
            error!(error = %err, "Connecting to database failed");
            return Err(err.into());
        }
    };

    let service = SegmentService::new(store.clone(), config.service.clone());
    let state = AppState::new(service);

    // Build HTTP router
    let app = routes::create_router(state, &config.http);

    info!(addr = %config.http.address, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(&config.http.address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Stopping server");
}

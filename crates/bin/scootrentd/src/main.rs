//! # scootrentd — scootrent daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env var overrides)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the rental store and the four upstream HTTP clients
//! - Construct the rental service, injecting collaborators via port traits
//! - Build the axum router, bind to a TCP port, and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::time::Duration;

use scootrent_adapter_http_axum::router;
use scootrent_adapter_http_axum::state::AppState;
use scootrent_adapter_storage_sqlite_sqlx::{Config as StorageConfig, SqliteRentalStore};
use scootrent_adapter_upstream_reqwest::{
    HttpLockControl, HttpPaymentGateway, HttpScooterRegistry, HttpUserRegistry, build_client,
};
use scootrent_app::services::rental_service::RentalService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database.url.clone(),
    }
    .build()
    .await?;
    let store = SqliteRentalStore::new(db.pool().clone());

    // Upstream clients share one HTTP client carrying the per-request timeout.
    let http = build_client(Duration::from_millis(config.upstream.timeout_ms))?;
    let scooters =
        HttpScooterRegistry::new(http.clone(), config.upstream.scooter_registry_url.as_str());
    let users = HttpUserRegistry::new(http.clone(), config.upstream.user_registry_url.as_str());
    let locks = HttpLockControl::new(http.clone(), config.upstream.lock_control_url.as_str());
    let payments = HttpPaymentGateway::new(http, config.upstream.payment_url.as_str());

    // Service + HTTP
    let service = RentalService::new(store, scooters, users, locks, payments);
    let app = router::build(AppState::new(service));

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "scootrentd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("shutdown signal received");
}

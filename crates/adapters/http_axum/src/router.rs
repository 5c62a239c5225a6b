//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use scootrent_app::ports::{LockControl, PaymentGateway, RentalStore, ScooterRegistry, UserRegistry};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the rental API plus a `/health` probe, with a [`TraceLayer`] that
/// logs each HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build<R, S, U, L, P>(state: AppState<R, S, U, L, P>) -> Router
where
    R: RentalStore + Send + Sync + 'static,
    S: ScooterRegistry + Send + Sync + 'static,
    U: UserRegistry + Send + Sync + 'static,
    L: LockControl + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

//! JSON REST API handler modules.

pub mod rentals;

use axum::Router;
use axum::routing::get;

use scootrent_app::ports::{LockControl, PaymentGateway, RentalStore, ScooterRegistry, UserRegistry};

use crate::state::AppState;

/// Build the `/aluguel` sub-router. The gateway proxies the path prefix
/// verbatim, so the routes carry it themselves.
pub fn routes<R, S, U, L, P>() -> Router<AppState<R, S, U, L, P>>
where
    R: RentalStore + Send + Sync + 'static,
    S: ScooterRegistry + Send + Sync + 'static,
    U: UserRegistry + Send + Sync + 'static,
    L: LockControl + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/aluguel",
            get(rentals::list::<R, S, U, L, P>).post(rentals::start::<R, S, U, L, P>),
        )
        .route(
            "/aluguel/{id}",
            get(rentals::get::<R, S, U, L, P>)
                .patch(rentals::end::<R, S, U, L, P>)
                .delete(rentals::delete::<R, S, U, L, P>),
        )
        .route(
            "/aluguel/usuario/{user_id}",
            get(rentals::list_by_user::<R, S, U, L, P>),
        )
        .route(
            "/aluguel/patinete/{scooter_id}",
            get(rentals::list_by_scooter::<R, S, U, L, P>),
        )
}

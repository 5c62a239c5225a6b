//! Shared application state for axum handlers.

use std::sync::Arc;

use scootrent_app::ports::{LockControl, PaymentGateway, RentalStore, ScooterRegistry, UserRegistry};
use scootrent_app::services::rental_service::RentalService;

/// Application state shared across all axum handlers.
///
/// Generic over the port implementations to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<R, S, U, L, P> {
    /// The rental orchestration service.
    pub rentals: Arc<RentalService<R, S, U, L, P>>,
}

impl<R, S, U, L, P> Clone for AppState<R, S, U, L, P> {
    fn clone(&self) -> Self {
        Self {
            rentals: Arc::clone(&self.rentals),
        }
    }
}

impl<R, S, U, L, P> AppState<R, S, U, L, P>
where
    R: RentalStore + Send + Sync + 'static,
    S: ScooterRegistry + Send + Sync + 'static,
    U: UserRegistry + Send + Sync + 'static,
    L: LockControl + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    /// Create a new application state from the rental service.
    pub fn new(rentals: RentalService<R, S, U, L, P>) -> Self {
        Self {
            rentals: Arc::new(rentals),
        }
    }
}

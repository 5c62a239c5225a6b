//! Scooter registry port — lookup and availability transitions against the
//! external scooter registry.

use std::future::Future;

use scootrent_domain::error::ScootRentError;
use scootrent_domain::id::ScooterSerial;
use scootrent_domain::scooter::{AvailabilityUpdate, Scooter};

/// Read/update access to the external scooter registry.
pub trait ScooterRegistry {
    /// Fetch a scooter by serial; `None` when the registry does not know it.
    fn get_scooter(
        &self,
        serial: ScooterSerial,
    ) -> impl Future<Output = Result<Option<Scooter>, ScootRentError>> + Send;

    /// Apply a partial availability/position update to a scooter.
    ///
    /// Idempotent on the registry side, so a single bounded retry is safe.
    fn set_availability(
        &self,
        serial: ScooterSerial,
        update: AvailabilityUpdate,
    ) -> impl Future<Output = Result<(), ScootRentError>> + Send;
}

//! Lock control port — the physical lock/unlock signal for a scooter.

use std::future::Future;

use scootrent_domain::error::ScootRentError;
use scootrent_domain::id::ScooterSerial;

/// Drives the external lock controller.
pub trait LockControl {
    /// Engage (`true`) or release (`false`) the lock on a scooter.
    ///
    /// The controller is accept-and-acknowledge and keeps no state here;
    /// repeating the same signal is harmless, so a single bounded retry
    /// is safe.
    fn set_lock(
        &self,
        serial: ScooterSerial,
        engaged: bool,
    ) -> impl Future<Output = Result<(), ScootRentError>> + Send;
}

//! Storage port — the rental table, the only state this service owns.

use std::future::Future;

use scootrent_domain::error::ScootRentError;
use scootrent_domain::id::{RentalId, ScooterSerial, UserId};
use scootrent_domain::rental::{Rental, RentalDraft};
use scootrent_domain::time::Timestamp;

/// Persistence for rental rows.
///
/// Implementations must support concurrent readers and writers; the
/// orchestrator mutates at most one row per request.
pub trait RentalStore {
    /// Insert a new open rental and return it with its store-assigned id.
    fn insert(
        &self,
        draft: RentalDraft,
    ) -> impl Future<Output = Result<Rental, ScootRentError>> + Send;

    /// Look up a rental by id.
    fn get_by_id(
        &self,
        id: RentalId,
    ) -> impl Future<Output = Result<Option<Rental>, ScootRentError>> + Send;

    /// All rentals, open and closed.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Rental>, ScootRentError>> + Send;

    /// All rentals taken by one user.
    fn find_by_user(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Vec<Rental>, ScootRentError>> + Send;

    /// All rentals of one scooter.
    fn find_by_scooter(
        &self,
        serial: ScooterSerial,
    ) -> impl Future<Output = Result<Vec<Rental>, ScootRentError>> + Send;

    /// Set `ended_at` and `amount` together on a still-open rental.
    ///
    /// Returns the number of rows changed. Zero means there is no *open*
    /// rental with `id` — the caller decides whether that is "not found"
    /// or "already closed"; it is never reported as a storage error.
    fn close(
        &self,
        id: RentalId,
        ended_at: Timestamp,
        amount: f64,
    ) -> impl Future<Output = Result<u64, ScootRentError>> + Send;

    /// Remove a rental row. Returns the number of rows changed.
    fn delete(&self, id: RentalId) -> impl Future<Output = Result<u64, ScootRentError>> + Send;
}

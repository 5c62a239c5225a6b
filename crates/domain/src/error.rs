//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into this taxonomy
//! via `#[from]` at the boundary. The five variants map one-to-one onto the
//! HTTP statuses the service exposes (400, 404, 409, 502, 500).

use crate::id::{RentalId, ScooterSerial};

/// Top-level error taxonomy for the rental-control service.
#[derive(Debug, thiserror::Error)]
pub enum ScootRentError {
    /// The request itself is malformed (bad time range, unparseable id).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The operation contradicts current state (scooter in use,
    /// rental already closed).
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// An external collaborator timed out or answered outside 2xx.
    #[error(transparent)]
    Unavailable(#[from] UpstreamError),

    /// The local rental store failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Request validation failures, detected before any mutation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A rental cannot end at or before the instant it started.
    #[error("rental end time must be after its start time")]
    EndNotAfterStart,

    /// A path parameter could not be parsed as an identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A request body failed to deserialize against the typed schema.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

/// A referenced entity is absent.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Human-readable entity kind ("Rental", "Scooter", "User").
    pub entity: &'static str,
    /// The identifier that failed to resolve.
    pub id: String,
}

/// The operation is valid in form but contradicts current state.
#[derive(Debug, thiserror::Error)]
pub enum ConflictError {
    /// Only an `available` scooter may be rented.
    #[error("scooter {serial} is not available for rental")]
    ScooterNotAvailable { serial: ScooterSerial },

    /// A closed rental is immutable; closing it again must not
    /// recompute or resubmit anything.
    #[error("rental {id} is already closed")]
    RentalAlreadyClosed { id: RentalId },
}

/// An external collaborator could not be reached or misbehaved.
#[derive(Debug, thiserror::Error)]
#[error("{service} is unavailable: {detail}")]
pub struct UpstreamError {
    /// Which collaborator failed ("scooter registry", "lock controller", …).
    pub service: &'static str,
    /// Transport-level detail, for logs and response bodies.
    pub detail: String,
}

//! Payment gateway port — charge submission against the external payment
//! service.

use std::future::Future;

use scootrent_domain::error::ScootRentError;
use scootrent_domain::payment::Charge;

/// Submits charges to the external payment service.
pub trait PaymentGateway {
    /// Submit one charge. Must be called at most once per closed rental —
    /// the submission is not idempotent and is never retried.
    fn submit(&self, charge: Charge) -> impl Future<Output = Result<(), ScootRentError>> + Send;
}

//! Mapping of transport-level failures onto the domain error taxonomy.

use reqwest::StatusCode;

use scootrent_domain::error::{ScootRentError, UpstreamError};

/// A request failed before producing a response (connect error, timeout,
/// body decode failure).
pub(crate) fn transport(service: &'static str, err: &reqwest::Error) -> ScootRentError {
    let detail = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    UpstreamError { service, detail }.into()
}

/// The collaborator answered outside the 2xx range.
pub(crate) fn unexpected_status(service: &'static str, status: StatusCode) -> ScootRentError {
    UpstreamError {
        service,
        detail: format!("unexpected status {status}"),
    }
    .into()
}

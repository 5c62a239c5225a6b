//! Shared HTTP client construction.

use std::time::Duration;

use reqwest::Client;

/// Build the HTTP client shared by all upstream adapters.
///
/// `timeout` applies to every request issued through the client; reqwest
/// clients are cheap to clone, so one client serves all four collaborators.
///
/// # Errors
///
/// Returns the underlying builder error if the TLS backend cannot be
/// initialized.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

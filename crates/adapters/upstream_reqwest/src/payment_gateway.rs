//! HTTP client for the external payment service.

use reqwest::Client;

use scootrent_app::ports::PaymentGateway;
use scootrent_domain::error::ScootRentError;
use scootrent_domain::payment::Charge;

use crate::error::{transport, unexpected_status};

/// Talks to the payment service's `/pagamento` endpoint.
pub struct HttpPaymentGateway {
    http: Client,
    base_url: String,
}

impl HttpPaymentGateway {
    const SERVICE: &'static str = "payment service";

    /// Create a client against the payment service at `base_url`.
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl PaymentGateway for HttpPaymentGateway {
    async fn submit(&self, charge: Charge) -> Result<(), ScootRentError> {
        let url = format!("{}/pagamento", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&charge)
            .send()
            .await
            .map_err(|err| transport(Self::SERVICE, &err))?;

        if !response.status().is_success() {
            return Err(unexpected_status(Self::SERVICE, response.status()));
        }
        Ok(())
    }
}

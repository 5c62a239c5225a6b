//! HTTP client for the external lock controller.

use reqwest::Client;
use serde::Serialize;

use scootrent_app::ports::LockControl;
use scootrent_domain::error::ScootRentError;
use scootrent_domain::id::ScooterSerial;

use crate::error::{transport, unexpected_status};

/// Command body understood by the lock controller.
#[derive(Serialize)]
struct AccessCommand {
    acesso: &'static str,
}

/// Talks to the lock controller's `/controle` endpoint.
pub struct HttpLockControl {
    http: Client,
    base_url: String,
}

impl HttpLockControl {
    const SERVICE: &'static str = "lock controller";

    /// Create a client against the controller at `base_url`.
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl LockControl for HttpLockControl {
    async fn set_lock(&self, serial: ScooterSerial, engaged: bool) -> Result<(), ScootRentError> {
        let url = format!("{}/controle/{serial}", self.base_url);
        let command = AccessCommand {
            acesso: if engaged { "bloquear" } else { "liberar" },
        };
        let response = self
            .http
            .patch(&url)
            .json(&command)
            .send()
            .await
            .map_err(|err| transport(Self::SERVICE, &err))?;

        if !response.status().is_success() {
            return Err(unexpected_status(Self::SERVICE, response.status()));
        }
        Ok(())
    }
}

//! HTTP client for the external user registry.

use reqwest::{Client, StatusCode};

use scootrent_app::ports::UserRegistry;
use scootrent_domain::error::ScootRentError;
use scootrent_domain::id::UserId;
use scootrent_domain::user::User;

use crate::error::{transport, unexpected_status};

/// Talks to the user registry's `/usuario` endpoints.
pub struct HttpUserRegistry {
    http: Client,
    base_url: String,
}

impl HttpUserRegistry {
    const SERVICE: &'static str = "user registry";

    /// Create a client against the registry at `base_url`.
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl UserRegistry for HttpUserRegistry {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, ScootRentError> {
        let url = format!("{}/usuario/{id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| transport(Self::SERVICE, &err))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(unexpected_status(Self::SERVICE, response.status()));
        }

        let user = response
            .json::<User>()
            .await
            .map_err(|err| transport(Self::SERVICE, &err))?;
        Ok(Some(user))
    }
}

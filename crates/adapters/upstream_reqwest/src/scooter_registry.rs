//! HTTP client for the external scooter registry.

use reqwest::{Client, StatusCode};

use scootrent_app::ports::ScooterRegistry;
use scootrent_domain::error::ScootRentError;
use scootrent_domain::id::ScooterSerial;
use scootrent_domain::scooter::{AvailabilityUpdate, Scooter};

use crate::error::{transport, unexpected_status};

/// Talks to the scooter registry's `/patinete` endpoints.
pub struct HttpScooterRegistry {
    http: Client,
    base_url: String,
}

impl HttpScooterRegistry {
    const SERVICE: &'static str = "scooter registry";

    /// Create a client against the registry at `base_url`.
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl ScooterRegistry for HttpScooterRegistry {
    async fn get_scooter(
        &self,
        serial: ScooterSerial,
    ) -> Result<Option<Scooter>, ScootRentError> {
        let url = format!("{}/patinete/{serial}", self.base_url);
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

        let scooter = response
            .json::<Scooter>()
            .await
            .map_err(|err| transport(Self::SERVICE, &err))?;
        Ok(Some(scooter))
    }

    async fn set_availability(
        &self,
        serial: ScooterSerial,
        update: AvailabilityUpdate,
    ) -> Result<(), ScootRentError> {
        let url = format!("{}/patinete/{serial}", self.base_url);
        let response = self
            .http
            .patch(&url)
            .json(&update)
            .send()
            .await
            .map_err(|err| transport(Self::SERVICE, &err))?;

        if !response.status().is_success() {
            return Err(unexpected_status(Self::SERVICE, response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::{get, patch};
    use axum::{Json, Router};
    use scootrent_domain::scooter::Availability;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn client() -> Client {
        crate::build_client(Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn should_fetch_and_parse_scooter_record() {
        let app = Router::new().route(
            "/patinete/{serial}",
            get(|Path(serial): Path<i64>| async move {
                Json(serde_json::json!({
                    "serial": serial,
                    "availability": "available",
                    "lat": -23.55,
                    "lng": -46.63,
                }))
            }),
        );
        let base_url = serve(app).await;
        let registry = HttpScooterRegistry::new(client(), base_url);

        let scooter = registry
            .get_scooter(ScooterSerial::new(21))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(scooter.serial, ScooterSerial::new(21));
        assert_eq!(scooter.availability, Availability::Available);
    }

    #[tokio::test]
    async fn should_return_none_when_registry_answers_not_found() {
        let app = Router::new().route(
            "/patinete/{serial}",
            get(|| async { StatusCode::NOT_FOUND }),
        );
        let base_url = serve(app).await;
        let registry = HttpScooterRegistry::new(client(), base_url);

        let scooter = registry.get_scooter(ScooterSerial::new(99)).await.unwrap();
        assert!(scooter.is_none());
    }

    #[tokio::test]
    async fn should_surface_server_error_as_unavailable() {
        let app = Router::new().route(
            "/patinete/{serial}",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base_url = serve(app).await;
        let registry = HttpScooterRegistry::new(client(), base_url);

        let result = registry.get_scooter(ScooterSerial::new(21)).await;
        assert!(matches!(result, Err(ScootRentError::Unavailable(_))));
    }

    #[tokio::test]
    async fn should_surface_timeout_as_unavailable() {
        let app = Router::new().route(
            "/patinete/{serial}",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                StatusCode::OK
            }),
        );
        let base_url = serve(app).await;
        let http = crate::build_client(Duration::from_millis(100)).unwrap();
        let registry = HttpScooterRegistry::new(http, base_url);

        let result = registry.get_scooter(ScooterSerial::new(21)).await;
        assert!(matches!(result, Err(ScootRentError::Unavailable(_))));
    }

    #[tokio::test]
    async fn should_patch_only_the_provided_fields() {
        let received: Arc<Mutex<Option<serde_json::Value>>> = Arc::default();
        let captured = Arc::clone(&received);
        let app = Router::new()
            .route(
                "/patinete/{serial}",
                patch(
                    |State(captured): State<Arc<Mutex<Option<serde_json::Value>>>>,
                     Json(body): Json<serde_json::Value>| async move {
                        *captured.lock().unwrap() = Some(body);
                        StatusCode::OK
                    },
                ),
            )
            .with_state(captured);
        let base_url = serve(app).await;
        let registry = HttpScooterRegistry::new(client(), base_url);

        registry
            .set_availability(
                ScooterSerial::new(21),
                AvailabilityUpdate::to(Availability::InUse),
            )
            .await
            .unwrap();

        let body = received.lock().unwrap().clone().unwrap();
        assert_eq!(body, serde_json::json!({"availability": "in_use"}));
    }
}

//! JSON REST handlers for the rental lifecycle.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use scootrent_app::ports::{LockControl, PaymentGateway, RentalStore, ScooterRegistry, UserRegistry};
use scootrent_domain::error::{NotFoundError, ScootRentError, ValidationError};
use scootrent_domain::id::{CardId, RentalId, ScooterSerial, UserId};
use scootrent_domain::rental::Rental;
use scootrent_domain::scooter::Position;
use scootrent_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for opening a rental.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRentalRequest {
    pub scooter_id: ScooterSerial,
    pub user_id: UserId,
    pub card: CardId,
}

/// Request body for closing a rental.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndRentalRequest {
    pub ended_at: Timestamp,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Response body for a started rental.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRentalResponse {
    pub id: RentalId,
    pub scooter_id: ScooterSerial,
    pub warnings: Vec<String>,
}

/// Response body for a closed rental.
#[derive(Serialize)]
pub struct EndRentalResponse {
    pub amount: f64,
    pub warnings: Vec<String>,
}

fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(ScootRentError::from(ValidationError::InvalidId(
            raw.to_string(),
        )))
    })
}

fn typed_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::from(ScootRentError::from(
            ValidationError::InvalidBody(rejection.body_text()),
        ))),
    }
}

/// `POST /aluguel`
pub async fn start<R, S, U, L, P>(
    State(state): State<AppState<R, S, U, L, P>>,
    body: Result<Json<StartRentalRequest>, JsonRejection>,
) -> Result<Json<StartRentalResponse>, ApiError>
where
    R: RentalStore + Send + Sync + 'static,
    S: ScooterRegistry + Send + Sync + 'static,
    U: UserRegistry + Send + Sync + 'static,
    L: LockControl + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    let req = typed_body(body)?;
    let started = state
        .rentals
        .start_rental(req.scooter_id, req.user_id, req.card)
        .await?;
    Ok(Json(StartRentalResponse {
        id: started.rental.id,
        scooter_id: started.rental.scooter_id,
        warnings: started.warnings,
    }))
}

/// `GET /aluguel`
pub async fn list<R, S, U, L, P>(
    State(state): State<AppState<R, S, U, L, P>>,
) -> Result<Json<Vec<Rental>>, ApiError>
where
    R: RentalStore + Send + Sync + 'static,
    S: ScooterRegistry + Send + Sync + 'static,
    U: UserRegistry + Send + Sync + 'static,
    L: LockControl + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    let rentals = state.rentals.list_rentals().await?;
    Ok(Json(rentals))
}

/// `GET /aluguel/{id}`
pub async fn get<R, S, U, L, P>(
    State(state): State<AppState<R, S, U, L, P>>,
    Path(id): Path<String>,
) -> Result<Json<Rental>, ApiError>
where
    R: RentalStore + Send + Sync + 'static,
    S: ScooterRegistry + Send + Sync + 'static,
    U: UserRegistry + Send + Sync + 'static,
    L: LockControl + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    let id = parse_id::<RentalId>(&id)?;
    let rental = state.rentals.get_rental(id).await?;
    Ok(Json(rental))
}

/// `GET /aluguel/usuario/{user_id}`
pub async fn list_by_user<R, S, U, L, P>(
    State(state): State<AppState<R, S, U, L, P>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Rental>>, ApiError>
where
    R: RentalStore + Send + Sync + 'static,
    S: ScooterRegistry + Send + Sync + 'static,
    U: UserRegistry + Send + Sync + 'static,
    L: LockControl + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    let user = parse_id::<UserId>(&user_id)?;
    let rentals = state.rentals.list_by_user(user).await?;
    if rentals.is_empty() {
        // Gateway contract: the per-user listing answers 404 when the user
        // has no rentals, unlike the top-level listing.
        return Err(ApiError::from(ScootRentError::from(NotFoundError {
            entity: "Rentals of user",
            id: user.to_string(),
        })));
    }
    Ok(Json(rentals))
}

/// `GET /aluguel/patinete/{scooter_id}`
pub async fn list_by_scooter<R, S, U, L, P>(
    State(state): State<AppState<R, S, U, L, P>>,
    Path(scooter_id): Path<String>,
) -> Result<Json<Vec<Rental>>, ApiError>
where
    R: RentalStore + Send + Sync + 'static,
    S: ScooterRegistry + Send + Sync + 'static,
    U: UserRegistry + Send + Sync + 'static,
    L: LockControl + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    let serial = parse_id::<ScooterSerial>(&scooter_id)?;
    let rentals = state.rentals.list_by_scooter(serial).await?;
    if rentals.is_empty() {
        return Err(ApiError::from(ScootRentError::from(NotFoundError {
            entity: "Rentals of scooter",
            id: serial.to_string(),
        })));
    }
    Ok(Json(rentals))
}

/// `PATCH /aluguel/{id}`
pub async fn end<R, S, U, L, P>(
    State(state): State<AppState<R, S, U, L, P>>,
    Path(id): Path<String>,
    body: Result<Json<EndRentalRequest>, JsonRejection>,
) -> Result<Json<EndRentalResponse>, ApiError>
where
    R: RentalStore + Send + Sync + 'static,
    S: ScooterRegistry + Send + Sync + 'static,
    U: UserRegistry + Send + Sync + 'static,
    L: LockControl + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    let id = parse_id::<RentalId>(&id)?;
    let req = typed_body(body)?;
    let position = match (req.lat, req.lng) {
        (Some(lat), Some(lng)) => Some(Position { lat, lng }),
        _ => None,
    };
    let closed = state.rentals.end_rental(id, req.ended_at, position).await?;
    Ok(Json(EndRentalResponse {
        amount: closed.amount,
        warnings: closed.warnings,
    }))
}

/// `DELETE /aluguel/{id}`
pub async fn delete<R, S, U, L, P>(
    State(state): State<AppState<R, S, U, L, P>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: RentalStore + Send + Sync + 'static,
    S: ScooterRegistry + Send + Sync + 'static,
    U: UserRegistry + Send + Sync + 'static,
    L: LockControl + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    let id = parse_id::<RentalId>(&id)?;
    state.rentals.delete_rental(id).await?;
    Ok(StatusCode::OK)
}

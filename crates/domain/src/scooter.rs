//! Scooter — identity, availability, and position, owned by the external
//! scooter registry and referenced here for precondition checks and
//! availability transitions.

use serde::{Deserialize, Serialize};

use crate::id::ScooterSerial;

/// Availability of a scooter in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    InUse,
    OutOfService,
}

impl Availability {
    /// Whether a rental may start on a scooter in this state.
    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => f.write_str("available"),
            Self::InUse => f.write_str("in_use"),
            Self::OutOfService => f.write_str("out_of_service"),
        }
    }
}

/// Last known geographic position of a scooter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// A scooter record as returned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scooter {
    pub serial: ScooterSerial,
    pub availability: Availability,
    pub lat: f64,
    pub lng: f64,
}

/// Partial update sent to the registry: any subset of availability and
/// position, absent fields left untouched on the registry side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl AvailabilityUpdate {
    /// Update that only transitions availability.
    #[must_use]
    pub fn to(availability: Availability) -> Self {
        Self {
            availability: Some(availability),
            lat: None,
            lng: None,
        }
    }

    /// Attach a drop-off position to the update.
    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.lat = Some(position.lat);
        self.lng = Some(position.lng);
        self
    }
}

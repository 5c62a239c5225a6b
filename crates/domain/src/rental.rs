//! Rental — a record of one scooter borrowed by one user for an interval.

use serde::{Deserialize, Serialize};

use crate::id::{CardId, RentalId, ScooterSerial, UserId};
use crate::time::Timestamp;

/// A rental row as stored by the rental store.
///
/// `ended_at` and `amount` are either both absent (open rental) or both
/// present (closed rental); the store sets them together in one update and
/// neither changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: RentalId,
    pub scooter_id: ScooterSerial,
    pub user_id: UserId,
    pub card: CardId,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub amount: Option<f64>,
}

impl Rental {
    /// Whether this rental has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.ended_at.is_some()
    }
}

/// A rental about to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalDraft {
    pub scooter_id: ScooterSerial,
    pub user_id: UserId,
    pub card: CardId,
    pub started_at: Timestamp,
}

impl RentalDraft {
    /// Open a new rental starting at `started_at`.
    #[must_use]
    pub fn new(
        scooter_id: ScooterSerial,
        user_id: UserId,
        card: CardId,
        started_at: Timestamp,
    ) -> Self {
        Self {
            scooter_id,
            user_id,
            card,
            started_at,
        }
    }

    /// Materialize the draft into a [`Rental`] with its store-assigned id.
    #[must_use]
    pub fn into_rental(self, id: RentalId) -> Rental {
        Rental {
            id,
            scooter_id: self.scooter_id,
            user_id: self.user_id,
            card: self.card,
            started_at: self.started_at,
            ended_at: None,
            amount: None,
        }
    }
}

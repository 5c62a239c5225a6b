//! Charge — a payment submission against the external payment service.

use serde::{Deserialize, Serialize};

use crate::id::{CardId, UserId};

/// One charge for a completed rental. Wire names follow the payment
/// service's contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    #[serde(rename = "usuario")]
    pub user: UserId,
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "cartao")]
    pub card: CardId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_with_payment_service_wire_names() {
        let charge = Charge {
            user: UserId::new(7),
            amount: 6.5,
            card: CardId::new(5001),
        };
        let json = serde_json::to_value(&charge).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"usuario": 7, "valor": 6.5, "cartao": 5001})
        );
    }
}

//! Pricing rule: a fixed unlock fee plus a per-minute rate.

use crate::error::ValidationError;
use crate::time::Timestamp;

/// Flat fee charged on every rental.
pub const FIXED_FEE: f64 = 5.00;

/// Fee per minute of rental time. Partial minutes are billed fractionally.
pub const PER_MINUTE_FEE: f64 = 0.15;

/// Compute the cost of a rental interval, rounded to cents.
///
/// # Errors
///
/// Returns [`ValidationError::EndNotAfterStart`] when `ended_at` is at or
/// before `started_at`; zero-length rentals are rejected, never billed as
/// zero minutes.
pub fn rental_cost(started_at: Timestamp, ended_at: Timestamp) -> Result<f64, ValidationError> {
    let elapsed_ms = (ended_at - started_at).num_milliseconds();
    if elapsed_ms <= 0 {
        return Err(ValidationError::EndNotAfterStart);
    }
    let minutes = elapsed_ms as f64 / 60_000.0;
    Ok(round_to_cents(FIXED_FEE + PER_MINUTE_FEE * minutes))
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn start() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn should_charge_fixed_fee_plus_per_minute_rate() {
        let amount = rental_cost(start(), start() + Duration::minutes(10)).unwrap();
        assert!((amount - 6.50).abs() < 1e-9);
    }

    #[test]
    fn should_bill_partial_minutes_fractionally() {
        let amount = rental_cost(start(), start() + Duration::seconds(90)).unwrap();
        // 5.00 + 0.15 * 1.5 = 5.225, rounded to cents
        assert!((amount - 5.23).abs() < 1e-9);
    }

    #[test]
    fn should_reject_zero_length_rental() {
        let result = rental_cost(start(), start());
        assert_eq!(result, Err(ValidationError::EndNotAfterStart));
    }

    #[test]
    fn should_reject_end_before_start() {
        let result = rental_cost(start(), start() - Duration::minutes(1));
        assert_eq!(result, Err(ValidationError::EndNotAfterStart));
    }

    #[test]
    fn should_round_to_two_decimal_places() {
        // 7 seconds: 5.00 + 0.15 * (7/60) = 5.0175 -> 5.02
        let amount = rental_cost(start(), start() + Duration::seconds(7)).unwrap();
        assert!((amount - 5.02).abs() < 1e-9);
    }
}

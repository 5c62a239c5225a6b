//! Typed identifier newtypes backed by `i64`.
//!
//! Every identifier in this system is assigned elsewhere: rental ids by the
//! rental store on insert, scooter serials and user/card numbers by the
//! external registries. The newtypes only prevent mixing them up.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier value.
            #[must_use]
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Access the inner value.
            #[must_use]
            pub fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Rental`](crate::rental::Rental),
    /// assigned monotonically by the rental store on insert.
    RentalId
);

define_id!(
    /// Serial number of a [`Scooter`](crate::scooter::Scooter),
    /// owned by the external scooter registry.
    ScooterSerial
);

define_id!(
    /// Identifier of a [`User`](crate::user::User) in the external
    /// user registry.
    UserId
);

define_id!(
    /// Payment instrument reference, opaque to this service.
    CardId
);

//! # scootrent-app
//!
//! Application layer — the rental sagas and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RentalStore` — the rental table, exclusively owned by this service
//!   - `ScooterRegistry` — scooter lookup and availability transitions
//!   - `UserRegistry` — user existence checks
//!   - `LockControl` — physical lock/unlock signal
//!   - `PaymentGateway` — at-most-once payment submission
//! - Implement the **rental orchestration service**: start/end rental as
//!   multi-step sagas across independently-owned collaborators, plus the
//!   plain lookup/listing/delete use-cases
//!
//! ## Dependency rule
//! Depends on `scootrent-domain` only (plus `tokio` for joining concurrent
//! upstream calls and pacing the single retry). Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

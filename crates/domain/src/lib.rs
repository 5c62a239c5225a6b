//! # scootrent-domain
//!
//! Pure domain model for the scootrent rental-control service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Rental** aggregate (one scooter borrowed by one user for an
//!   interval, with a computed cost)
//! - Define **Scooter** availability and position as seen through the
//!   external scooter registry
//! - Define **User** and **Charge** records as seen through the external
//!   user registry and payment service
//! - Contain the pricing rule and all invariant enforcement
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod payment;
pub mod pricing;
pub mod rental;
pub mod scooter;
pub mod user;

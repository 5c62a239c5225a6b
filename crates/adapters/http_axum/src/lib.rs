//! # scootrent-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the rental API the gateway proxies under the `/aluguel` prefix
//! - Map HTTP requests into application service calls (driving adapter),
//!   with typed request bodies validated before any external call
//! - Map application results and errors onto HTTP responses and statuses
//!
//! ## Dependency rule
//! Depends on `scootrent-app` (for port traits and the rental service) and
//! `scootrent-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

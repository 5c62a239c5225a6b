//! # scootrent-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the [`RentalStore`](scootrent_app::ports::RentalStore) port
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `scootrent-app` (for the port trait) and `scootrent-domain`
//! (for domain types). The `app` and `domain` crates must never reference
//! this adapter.

pub mod error;
pub mod pool;
pub mod rental_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use rental_repo::SqliteRentalStore;

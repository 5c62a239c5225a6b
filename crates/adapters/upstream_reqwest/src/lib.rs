//! # scootrent-adapter-upstream-reqwest
//!
//! Outbound HTTP clients built on [reqwest](https://docs.rs/reqwest) for the
//! four external collaborators of the rental saga.
//!
//! ## Responsibilities
//! - Implement the upstream port traits defined in `scootrent-app::ports`
//! - Speak each collaborator's wire contract (paths and body field names)
//! - Carry a per-request timeout on every call; surface timeouts, transport
//!   errors, and non-2xx answers as typed `Unavailable` failures, never as a
//!   crash
//!
//! ## Dependency rule
//! Depends on `scootrent-app` (for port traits) and `scootrent-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod client;
pub mod error;
pub mod lock_control;
pub mod payment_gateway;
pub mod scooter_registry;
pub mod user_registry;

pub use client::build_client;
pub use lock_control::HttpLockControl;
pub use payment_gateway::HttpPaymentGateway;
pub use scooter_registry::HttpScooterRegistry;
pub use user_registry::HttpUserRegistry;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;

    /// Serve a router on an ephemeral local port, returning its base URL.
    pub(crate) async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }
}

//! User registry port — existence checks against the external user registry.

use std::future::Future;

use scootrent_domain::error::ScootRentError;
use scootrent_domain::id::UserId;
use scootrent_domain::user::User;

/// Read access to the external user registry.
pub trait UserRegistry {
    /// Fetch a user by id; `None` when the registry does not know them.
    fn get_user(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, ScootRentError>> + Send;
}

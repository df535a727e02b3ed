//! Driving port for account registration and self-service profile edits.

use async_trait::async_trait;

use crate::domain::{Error, ProfileUpdate, Registration, User, UserId};

/// Domain use-case port for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Create a regular active account.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Create an account with staff and superuser flags set.
    async fn create_superuser(&self, registration: Registration) -> Result<User, Error>;

    /// Read the caller's own account.
    async fn profile(&self, user_id: &UserId) -> Result<User, Error>;

    /// Apply a partial update to the caller's own account. A new password is
    /// hashed before storage.
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate)
    -> Result<User, Error>;
}

//! Account service implementing the login and user account driving ports.
//!
//! Password hashing happens here rather than in adapters so every
//! persistence backend stores the same PHC strings.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{LoginService, UserAccounts, UserPersistenceError, UserRepository};
use crate::domain::{
    Error, LoginCredentials, NewUser, PasswordHash, ProfileUpdate, Registration, User,
    UserChanges, UserId, UserRoles,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::invalid_request("a user with this email already exists").with_details(json!({
                "field": "email",
                "code": "email_taken",
            }))
        }
    }
}

/// Account service backed by a [`UserRepository`].
#[derive(Clone)]
pub struct UserAccountService<R> {
    users: Arc<R>,
}

impl<R> UserAccountService<R> {
    /// Create a new service with the user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> UserAccountService<R>
where
    R: UserRepository,
{
    async fn create_account(
        &self,
        registration: Registration,
        roles: UserRoles,
    ) -> Result<User, Error> {
        let password_hash = PasswordHash::generate(&registration.password).await?;
        let new_user = NewUser {
            email: registration.email,
            name: registration.name,
            password_hash,
            roles,
        };
        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(
            user_id = %user.id(),
            superuser = user.is_superuser(),
            "account created"
        );
        Ok(user)
    }
}

#[async_trait]
impl<R> LoginService for UserAccountService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(stored) = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if !stored.password_hash.verify(credentials.password()).await {
            debug!(user_id = %stored.user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        if !stored.user.is_active() {
            debug!(user_id = %stored.user.id(), "login rejected: inactive account");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(stored.user.id().clone())
    }
}

#[async_trait]
impl<R> UserAccounts for UserAccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        self.create_account(registration, UserRoles::default())
            .await
    }

    async fn create_superuser(&self, registration: Registration) -> Result<User, Error> {
        self.create_account(registration, UserRoles::superuser())
            .await
    }

    async fn profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<User, Error> {
        let password_hash = match update.password {
            Some(password) => Some(PasswordHash::generate(&password).await?),
            None => None,
        };
        let changes = UserChanges {
            email: update.email,
            name: update.name,
            password_hash,
        };
        let user = self
            .users
            .update(user_id, &changes)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        info!(user_id = %user.id(), "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;

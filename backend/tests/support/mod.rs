//! Shared helpers for the Diesel adapter suites.
//!
//! Each suite compiles as its own crate and pulls this module in with
//! `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

use pg_embedded_setup_unpriv::TemporaryDatabase;
use recipe_backend::domain::ports::UserRepository;
use recipe_backend::domain::{EmailAddress, NewUser, PasswordHash, UserId, UserName, UserRoles};
use recipe_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use tokio::runtime::Runtime;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_template_database, shared_cluster};

/// A migrated throwaway database with a pool and the runtime that drives it.
pub struct DbContext {
    pub runtime: Runtime,
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

impl DbContext {
    pub fn new() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = shared_cluster()?;
        let database = provision_template_database(cluster, &runtime)?;
        let config = PoolConfig::new(database.url())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;
        Ok(Self {
            runtime,
            pool,
            _database: database,
        })
    }

    /// Insert an account so recipes and labels have an owner to reference.
    pub fn seed_user(&self, email: &str) -> UserId {
        let repository = DieselUserRepository::new(self.pool.clone());
        let user = new_user(email);
        self.runtime
            .block_on(repository.insert(&user))
            .expect("seed user")
            .id()
            .clone()
    }
}

/// Registration payload with a placeholder hash.
pub fn new_user(email: &str) -> NewUser {
    NewUser {
        email: EmailAddress::new(email).expect("fixture email"),
        name: UserName::new("Cook").expect("fixture name"),
        password_hash: PasswordHash::from_stored("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
        roles: UserRoles::default(),
    }
}

/// Fixture body shared by the suites: `None` means the cluster is skipped.
pub fn db_context_or_skip() -> Option<DbContext> {
    match DbContext::new() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

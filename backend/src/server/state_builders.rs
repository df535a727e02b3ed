//! Builders for the HTTP state from the configured storage backend.

use std::sync::Arc;

use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::outbound::memory::MemoryStore;
use recipe_backend::outbound::persistence::{
    DbPool, DieselLabelRepository, DieselRecipeRepository, DieselUserRepository,
};
use tracing::{info, warn};

use super::ServerConfig;

fn diesel_state(pool: &DbPool) -> HttpState {
    HttpState::from_repositories(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselRecipeRepository::new(pool.clone())),
        Arc::new(DieselLabelRepository::new(pool.clone())),
    )
}

fn memory_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    HttpState::from_repositories(store.clone(), store.clone(), store)
}

/// Build the HTTP state using PostgreSQL when a pool is configured, otherwise
/// an in-memory store that is lost on restart.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            diesel_state(pool)
        }
        None => {
            warn!("no database configured; data is kept in memory only");
            memory_state()
        }
    }
}

//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports,
//! so they can be exercised without a database.

use std::sync::Arc;

use crate::domain::ports::{
    LabelRepository, LabelsCommand, LabelsQuery, LoginService, RecipeRepository, RecipesCommand,
    RecipesQuery, UserAccounts, UserRepository,
};
use crate::domain::{LabelService, RecipeService, UserAccountService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn UserAccounts>,
    pub recipes: Arc<dyn RecipesCommand>,
    pub recipes_query: Arc<dyn RecipesQuery>,
    pub labels: Arc<dyn LabelsCommand>,
    pub labels_query: Arc<dyn LabelsQuery>,
}

impl HttpState {
    /// Wire the domain services on top of the given repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use recipe_backend::inbound::http::state::HttpState;
    /// use recipe_backend::outbound::memory::MemoryStore;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let state = HttpState::from_repositories(store.clone(), store.clone(), store);
    /// let _recipes = state.recipes_query.clone();
    /// ```
    pub fn from_repositories<U, R, L>(users: Arc<U>, recipes: Arc<R>, labels: Arc<L>) -> Self
    where
        U: UserRepository + 'static,
        R: RecipeRepository + 'static,
        L: LabelRepository + 'static,
    {
        let accounts = Arc::new(UserAccountService::new(users));
        let recipe_service = Arc::new(RecipeService::new(recipes, labels.clone()));
        let label_service = Arc::new(LabelService::new(labels));
        Self {
            login: accounts.clone(),
            accounts,
            recipes: recipe_service.clone(),
            recipes_query: recipe_service,
            labels: label_service.clone(),
            labels_query: label_service,
        }
    }
}

//! Driving port for reading the caller's recipes.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeFilter, RecipeId, UserId};

/// Domain use-case port for recipe reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// List the owner's recipes, newest first.
    async fn list(&self, owner: &UserId, filter: RecipeFilter) -> Result<Vec<Recipe>, Error>;

    /// Fetch one recipe; not found when absent or owned by someone else.
    async fn get(&self, owner: &UserId, id: RecipeId) -> Result<Recipe, Error>;
}

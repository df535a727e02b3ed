//! Port for owner-scoped recipe persistence.
//!
//! Every method takes the owning user so adapters can scope reads and
//! writes; a recipe owned by someone else is indistinguishable from one that
//! does not exist.

use async_trait::async_trait;

use crate::domain::{
    LabelAssignment, Recipe, RecipeChanges, RecipeDraft, RecipeFilter, RecipeId, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

/// Storage for recipes and their label associations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// List the owner's recipes, newest first, optionally filtered by label.
    async fn list(
        &self,
        owner: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Fetch one of the owner's recipes.
    async fn find(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Insert a recipe and its associations in one transaction.
    async fn insert(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
        labels: &LabelAssignment,
    ) -> Result<RecipeId, RecipeRepositoryError>;

    /// Apply scalar changes and replace the association sets that are
    /// present. Returns `false` when the owner has no such recipe.
    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: &RecipeChanges,
        labels: &LabelAssignment,
    ) -> Result<bool, RecipeRepositoryError>;

    /// Delete a recipe. Returns `false` when the owner has no such recipe.
    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError>;
}

//! Driving port for recipe mutations.
//!
//! Requests carry tag and ingredient names rather than ids; the service
//! reconciles them against the owner's existing labels.

use async_trait::async_trait;

use crate::domain::{Error, LabelNames, Recipe, RecipeChanges, RecipeDraft, RecipeId, UserId};

/// Input for creating a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecipeRequest {
    pub draft: RecipeDraft,
    pub labels: LabelNames,
}

/// Input for a full or partial recipe update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRecipeRequest {
    pub changes: RecipeChanges,
    pub labels: LabelNames,
}

/// Domain use-case port for recipe mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    /// Create a recipe owned by `owner` and return its detail view.
    async fn create(&self, owner: &UserId, request: CreateRecipeRequest) -> Result<Recipe, Error>;

    /// Update one of the owner's recipes and return its detail view.
    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        request: UpdateRecipeRequest,
    ) -> Result<Recipe, Error>;

    /// Delete one of the owner's recipes. Labels are kept.
    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<(), Error>;
}

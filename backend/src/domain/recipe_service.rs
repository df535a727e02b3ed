//! Recipe domain services.
//!
//! These services implement the recipe driving ports, reconciling tag and
//! ingredient names before handing resolved ids to the recipe repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::label_reconciler::LabelReconciler;
use crate::domain::ports::{
    CreateRecipeRequest, LabelRepository, RecipeRepository, RecipeRepositoryError,
    RecipesCommand, RecipesQuery, UpdateRecipeRequest,
};
use crate::domain::{Error, LabelNames, Recipe, RecipeFilter, RecipeId, UserId};

fn map_repository_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
    }
}

fn recipe_not_found(id: RecipeId) -> Error {
    Error::not_found(format!("recipe {id} not found"))
}

/// Recipe service implementing the query and command driving ports.
#[derive(Clone)]
pub struct RecipeService<R, L> {
    recipes: Arc<R>,
    reconciler: LabelReconciler<L>,
}

impl<R, L> RecipeService<R, L> {
    /// Create a new service over the recipe and label repositories.
    pub fn new(recipes: Arc<R>, labels: Arc<L>) -> Self {
        Self {
            recipes,
            reconciler: LabelReconciler::new(labels),
        }
    }
}

impl<R, L> RecipeService<R, L>
where
    R: RecipeRepository,
    L: LabelRepository,
{
    async fn load(&self, owner: &UserId, id: RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find(owner, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| recipe_not_found(id))
    }
}

#[async_trait]
impl<R, L> RecipesQuery for RecipeService<R, L>
where
    R: RecipeRepository,
    L: LabelRepository,
{
    async fn list(&self, owner: &UserId, filter: RecipeFilter) -> Result<Vec<Recipe>, Error> {
        self.recipes
            .list(owner, &filter)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, owner: &UserId, id: RecipeId) -> Result<Recipe, Error> {
        self.load(owner, id).await
    }
}

#[async_trait]
impl<R, L> RecipesCommand for RecipeService<R, L>
where
    R: RecipeRepository,
    L: LabelRepository,
{
    async fn create(&self, owner: &UserId, request: CreateRecipeRequest) -> Result<Recipe, Error> {
        // On create an absent list behaves like an empty one.
        let names = LabelNames {
            tags: Some(request.labels.tags.unwrap_or_default()),
            ingredients: Some(request.labels.ingredients.unwrap_or_default()),
        };
        let assignment = self.reconciler.resolve_all(owner, &names).await?;
        let id = self
            .recipes
            .insert(owner, &request.draft, &assignment)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %owner, recipe_id = %id, "recipe created");
        self.recipes
            .find(owner, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::internal(format!("recipe {id} vanished after insert")))
    }

    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        request: UpdateRecipeRequest,
    ) -> Result<Recipe, Error> {
        // Resolve ownership first so a foreign id never creates labels.
        self.load(owner, id).await?;
        let assignment = self.reconciler.resolve_all(owner, &request.labels).await?;
        let updated = self
            .recipes
            .update(owner, id, &request.changes, &assignment)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(recipe_not_found(id));
        }
        info!(user_id = %owner, recipe_id = %id, "recipe updated");
        self.load(owner, id).await
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<(), Error> {
        let deleted = self
            .recipes
            .delete(owner, id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(recipe_not_found(id));
        }
        info!(user_id = %owner, recipe_id = %id, "recipe deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;

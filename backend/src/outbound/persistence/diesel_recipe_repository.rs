//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! Recipe rows and their `recipe_labels` links are written in one
//! transaction. Reads load the recipe rows first and then all of their
//! labels in a second query.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    Label, LabelAssignment, LabelId, LabelKind, Price, Recipe, RecipeChanges, RecipeDraft,
    RecipeFilter, RecipeId, RecipeLink, RecipeTitle, TimeMinutes, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_label_repository::row_to_label;
use super::models::{LabelRow, NewRecipeRow, RecipeChangeset, RecipeLabelRow, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::{labels, recipe_labels, recipes};

/// Diesel-backed implementation of the recipe repository port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    map_basic_pool_error(error, RecipeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    map_basic_diesel_error(
        error,
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

fn raw_ids(ids: &[LabelId]) -> Vec<i64> {
    ids.iter().map(|id| id.get()).collect()
}

fn changeset(changes: &RecipeChanges) -> RecipeChangeset<'_> {
    RecipeChangeset {
        title: changes.title.as_ref().map(AsRef::as_ref),
        time_minutes: changes.time_minutes.map(TimeMinutes::get),
        price: changes.price.as_ref().map(Price::as_decimal),
        description: changes.description.as_deref(),
        link: changes.link.as_ref().map(AsRef::as_ref),
    }
}

/// Labels for one recipe, split by kind.
#[derive(Default)]
struct RecipeLabels {
    tags: Vec<Label>,
    ingredients: Vec<Label>,
}

/// Convert a recipe row plus its labels into a validated domain recipe.
fn row_to_recipe(row: RecipeRow, attached: RecipeLabels) -> Result<Recipe, RecipeRepositoryError> {
    let invalid = |field: &str, err: &dyn std::fmt::Display| {
        RecipeRepositoryError::query(format!("stored recipe {field} invalid: {err}"))
    };
    Ok(Recipe {
        id: RecipeId::new(row.id),
        title: RecipeTitle::new(&row.title).map_err(|err| invalid("title", &err))?,
        time_minutes: TimeMinutes::new(row.time_minutes)
            .map_err(|err| invalid("time_minutes", &err))?,
        price: Price::new(row.price).map_err(|err| invalid("price", &err))?,
        description: row.description,
        link: RecipeLink::new(&row.link).map_err(|err| invalid("link", &err))?,
        tags: attached.tags,
        ingredients: attached.ingredients,
    })
}

/// Load the labels of every listed recipe, grouped by recipe id.
async fn load_labels(
    conn: &mut AsyncPgConnection,
    recipe_ids: &[i64],
) -> Result<HashMap<i64, RecipeLabels>, RecipeRepositoryError> {
    let rows: Vec<(i64, LabelRow)> = recipe_labels::table
        .inner_join(labels::table)
        .filter(recipe_labels::recipe_id.eq_any(recipe_ids))
        .order(labels::id.asc())
        .select((recipe_labels::recipe_id, LabelRow::as_select()))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let mut grouped: HashMap<i64, RecipeLabels> = HashMap::new();
    for (recipe_id, row) in rows {
        let label = row_to_label(row).map_err(|err| RecipeRepositoryError::query(err.to_string()))?;
        let entry = grouped.entry(recipe_id).or_default();
        match label.kind {
            LabelKind::Tag => entry.tags.push(label),
            LabelKind::Ingredient => entry.ingredients.push(label),
        }
    }
    Ok(grouped)
}

async fn assemble(
    conn: &mut AsyncPgConnection,
    rows: Vec<RecipeRow>,
) -> Result<Vec<Recipe>, RecipeRepositoryError> {
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let mut grouped = load_labels(conn, &ids).await?;
    rows.into_iter()
        .map(|row| {
            let attached = grouped.remove(&row.id).unwrap_or_default();
            row_to_recipe(row, attached)
        })
        .collect()
}

/// Replace the recipe's links of one kind with `label_ids`.
async fn replace_links(
    conn: &mut AsyncPgConnection,
    recipe_id: i64,
    kind: LabelKind,
    label_ids: &[LabelId],
) -> Result<(), diesel::result::Error> {
    let same_kind = labels::table
        .filter(labels::kind.eq(kind.as_str()))
        .select(labels::id);
    diesel::delete(
        recipe_labels::table
            .filter(recipe_labels::recipe_id.eq(recipe_id))
            .filter(recipe_labels::label_id.eq_any(same_kind)),
    )
    .execute(conn)
    .await?;
    insert_links(conn, recipe_id, label_ids).await
}

async fn insert_links(
    conn: &mut AsyncPgConnection,
    recipe_id: i64,
    label_ids: &[LabelId],
) -> Result<(), diesel::result::Error> {
    if label_ids.is_empty() {
        return Ok(());
    }
    let rows: Vec<RecipeLabelRow> = raw_ids(label_ids)
        .into_iter()
        .map(|label_id| RecipeLabelRow {
            recipe_id,
            label_id,
        })
        .collect();
    diesel::insert_into(recipe_labels::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .await
        .map(|_| ())
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn list(
        &self,
        owner: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = recipes::table
            .filter(recipes::user_id.eq(owner.as_uuid()))
            .order(recipes::id.desc())
            .select(RecipeRow::as_select())
            .into_boxed();
        for (kind, ids) in [
            (LabelKind::Tag, &filter.tag_ids),
            (LabelKind::Ingredient, &filter.ingredient_ids),
        ] {
            let Some(ids) = ids else { continue };
            let linked = recipe_labels::table
                .inner_join(labels::table)
                .filter(labels::kind.eq(kind.as_str()))
                .filter(recipe_labels::label_id.eq_any(raw_ids(ids)))
                .select(recipe_labels::recipe_id);
            query = query.filter(recipes::id.eq_any(linked));
        }

        let rows: Vec<RecipeRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        assemble(&mut conn, rows).await
    }

    async fn find(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = recipes::table
            .filter(recipes::id.eq(id.get()))
            .filter(recipes::user_id.eq(owner.as_uuid()))
            .select(RecipeRow::as_select())
            .first::<RecipeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(assemble(&mut conn, vec![row]).await?.pop())
    }

    async fn insert(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
        assignment: &LabelAssignment,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewRecipeRow {
            user_id: *owner.as_uuid(),
            title: draft.title.as_ref(),
            time_minutes: draft.time_minutes.get(),
            price: draft.price.as_decimal(),
            description: draft.description.as_str(),
            link: draft.link.as_ref(),
        };
        let tag_ids = assignment.tags.as_deref().unwrap_or_default();
        let ingredient_ids = assignment.ingredients.as_deref().unwrap_or_default();

        let id = conn
            .transaction(|conn| {
                async move {
                    let id: i64 = diesel::insert_into(recipes::table)
                        .values(&new_row)
                        .returning(recipes::id)
                        .get_result(conn)
                        .await?;
                    insert_links(conn, id, tag_ids).await?;
                    insert_links(conn, id, ingredient_ids).await?;
                    Ok::<_, diesel::result::Error>(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(RecipeId::new(id))
    }

    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: &RecipeChanges,
        assignment: &LabelAssignment,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner_uuid = *owner.as_uuid();
        let recipe_id = id.get();

        conn.transaction(|conn| {
            async move {
                let owned = recipes::table
                    .filter(recipes::id.eq(recipe_id))
                    .filter(recipes::user_id.eq(owner_uuid));
                let found = if changes.is_empty() {
                    diesel::select(diesel::dsl::exists(owned))
                        .get_result::<bool>(conn)
                        .await?
                } else {
                    diesel::update(owned)
                        .set(&changeset(changes))
                        .execute(conn)
                        .await?
                        > 0
                };
                if !found {
                    return Ok(false);
                }
                if let Some(tag_ids) = &assignment.tags {
                    replace_links(conn, recipe_id, LabelKind::Tag, tag_ids).await?;
                }
                if let Some(ingredient_ids) = &assignment.ingredients {
                    replace_links(conn, recipe_id, LabelKind::Ingredient, ingredient_ids).await?;
                }
                Ok::<_, diesel::result::Error>(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            recipes::table
                .filter(recipes::id.eq(id.get()))
                .filter(recipes::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

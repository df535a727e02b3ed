//! PostgreSQL-backed `LabelRepository` implementation using Diesel ORM.
//!
//! Tags and ingredients share the `labels` table; every query filters on
//! both the owner and the `kind` column.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LabelRepository, LabelRepositoryError};
use crate::domain::{Label, LabelId, LabelKind, LabelName, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{LabelRow, NewLabelRow};
use super::pool::{DbPool, PoolError};
use super::schema::{labels, recipe_labels};

/// Diesel-backed implementation of the label repository port.
#[derive(Clone)]
pub struct DieselLabelRepository {
    pool: DbPool,
}

impl DieselLabelRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LabelRepositoryError {
    map_basic_pool_error(error, LabelRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> LabelRepositoryError {
    map_basic_diesel_error(
        error,
        LabelRepositoryError::query,
        LabelRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain label.
pub(super) fn row_to_label(row: LabelRow) -> Result<Label, LabelRepositoryError> {
    let kind = row
        .kind
        .parse::<LabelKind>()
        .map_err(|err| LabelRepositoryError::query(err.to_string()))?;
    let name = LabelName::new(&row.name)
        .map_err(|err| LabelRepositoryError::query(format!("stored label name invalid: {err}")))?;
    Ok(Label {
        id: LabelId::new(row.id),
        kind,
        name,
    })
}

fn rows_to_labels(rows: Vec<LabelRow>) -> Result<Vec<Label>, LabelRepositoryError> {
    rows.into_iter().map(row_to_label).collect()
}

#[async_trait]
impl LabelRepository for DieselLabelRepository {
    async fn list(
        &self,
        owner: &UserId,
        kind: LabelKind,
        assigned_only: bool,
    ) -> Result<Vec<Label>, LabelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = labels::table
            .filter(labels::user_id.eq(owner.as_uuid()))
            .filter(labels::kind.eq(kind.as_str()))
            .order((labels::name.desc(), labels::id.desc()))
            .select(LabelRow::as_select())
            .into_boxed();
        if assigned_only {
            query = query.filter(exists(
                recipe_labels::table.filter(recipe_labels::label_id.eq(labels::id)),
            ));
        }

        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows_to_labels(rows)
    }

    async fn find(
        &self,
        owner: &UserId,
        kind: LabelKind,
        id: LabelId,
    ) -> Result<Option<Label>, LabelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = labels::table
            .filter(labels::id.eq(id.get()))
            .filter(labels::user_id.eq(owner.as_uuid()))
            .filter(labels::kind.eq(kind.as_str()))
            .select(LabelRow::as_select())
            .first::<LabelRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_label).transpose()
    }

    async fn find_by_name(
        &self,
        owner: &UserId,
        kind: LabelKind,
        name: &LabelName,
    ) -> Result<Option<Label>, LabelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = labels::table
            .filter(labels::user_id.eq(owner.as_uuid()))
            .filter(labels::kind.eq(kind.as_str()))
            .filter(labels::name.eq(name.as_ref()))
            .order(labels::id.asc())
            .select(LabelRow::as_select())
            .first::<LabelRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_label).transpose()
    }

    async fn create(
        &self,
        owner: &UserId,
        kind: LabelKind,
        name: &LabelName,
    ) -> Result<Label, LabelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewLabelRow {
            user_id: *owner.as_uuid(),
            kind: kind.as_str(),
            name: name.as_ref(),
        };
        let row = diesel::insert_into(labels::table)
            .values(&new_row)
            .returning(LabelRow::as_returning())
            .get_result::<LabelRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_label(row)
    }

    async fn rename(
        &self,
        owner: &UserId,
        kind: LabelKind,
        id: LabelId,
        name: &LabelName,
    ) -> Result<Option<Label>, LabelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            labels::table
                .filter(labels::id.eq(id.get()))
                .filter(labels::user_id.eq(owner.as_uuid()))
                .filter(labels::kind.eq(kind.as_str())),
        )
        .set(labels::name.eq(name.as_ref()))
        .returning(LabelRow::as_returning())
        .get_result::<LabelRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_label).transpose()
    }

    async fn delete(
        &self,
        owner: &UserId,
        kind: LabelKind,
        id: LabelId,
    ) -> Result<bool, LabelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // recipe_labels rows go with it via ON DELETE CASCADE.
        let deleted = diesel::delete(
            labels::table
                .filter(labels::id.eq(id.get()))
                .filter(labels::user_id.eq(owner.as_uuid()))
                .filter(labels::kind.eq(kind.as_str())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

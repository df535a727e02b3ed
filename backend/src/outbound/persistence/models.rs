//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{labels, recipe_labels, recipes, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Changeset for self-service profile edits. `None` columns are skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub email: Option<&'a str>,
    pub name: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Recipe models
// ---------------------------------------------------------------------------

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: BigDecimal,
    pub description: String,
    pub link: String,
}

/// Insertable struct for creating recipes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub time_minutes: i32,
    pub price: &'a BigDecimal,
    pub description: &'a str,
    pub link: &'a str,
}

/// Changeset for partial recipe updates. `None` columns are skipped.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeChangeset<'a> {
    pub title: Option<&'a str>,
    pub time_minutes: Option<i32>,
    pub price: Option<&'a BigDecimal>,
    pub description: Option<&'a str>,
    pub link: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Label models
// ---------------------------------------------------------------------------

/// Row struct for reading from the labels table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = labels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LabelRow {
    pub id: i64,
    pub kind: String,
    pub name: String,
}

/// Insertable struct for creating labels.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = labels)]
pub(crate) struct NewLabelRow<'a> {
    pub user_id: Uuid,
    pub kind: &'a str,
    pub name: &'a str,
}

/// Insertable link between a recipe and a label.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = recipe_labels)]
pub(crate) struct RecipeLabelRow {
    pub recipe_id: i64,
    pub label_id: i64,
}

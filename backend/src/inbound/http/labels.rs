//! Tag and ingredient API handlers.
//!
//! ```text
//! GET    /api/v1/tags?assigned_only=1
//! PUT    /api/v1/tags/{id} {"name":"Dessert"}
//! PATCH  /api/v1/tags/{id} {"name":"Dessert"}
//! DELETE /api/v1/tags/{id}
//! ```
//!
//! `/api/v1/ingredients` mirrors the tag routes. Labels are created only
//! through recipe payloads, so there is no `POST`.

use actix_web::{HttpResponse, delete, get, patch, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, LabelId, LabelKind, LabelName, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes::LabelResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, NAME, label_name_error, missing_field_error, parse_flag,
};

const ASSIGNED_ONLY: FieldName = FieldName::new("assigned_only");

#[derive(Debug, Deserialize)]
pub struct LabelPath {
    id: String,
}

/// Query parameters accepted by the label list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LabelListQuery {
    /// `1` or `true` limits the list to labels used by at least one recipe.
    #[param(example = "1")]
    pub assigned_only: Option<String>,
}

/// Request body for renaming a tag or ingredient.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LabelRequest {
    #[schema(example = "Dessert")]
    pub name: Option<String>,
}

fn parse_label_id(kind: LabelKind, path: LabelPath) -> Result<LabelId, Error> {
    path.id
        .parse::<i64>()
        .map(LabelId::new)
        .map_err(|_| Error::not_found(format!("{kind} {} not found", path.id)))
}

fn parse_name(raw: &str) -> Result<LabelName, Error> {
    LabelName::new(raw).map_err(|err| label_name_error(NAME, &err))
}

async fn list_labels(
    state: &HttpState,
    session: &SessionContext,
    kind: LabelKind,
    query: LabelListQuery,
) -> ApiResult<web::Json<Vec<LabelResponse>>> {
    let owner = session.require_user_id()?;
    let assigned_only = parse_flag(query.assigned_only.as_deref(), ASSIGNED_ONLY)?;
    let labels = state.labels_query.list(&owner, kind, assigned_only).await?;
    Ok(web::Json(
        labels.into_iter().map(LabelResponse::from).collect(),
    ))
}

async fn rename_label(
    state: &HttpState,
    owner: &UserId,
    kind: LabelKind,
    id: LabelId,
    name: LabelName,
) -> ApiResult<web::Json<LabelResponse>> {
    let label = state.labels.rename(owner, kind, id, name).await?;
    Ok(web::Json(LabelResponse::from(label)))
}

async fn replace_label(
    state: &HttpState,
    session: &SessionContext,
    kind: LabelKind,
    path: LabelPath,
    payload: LabelRequest,
) -> ApiResult<web::Json<LabelResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_label_id(kind, path)?;
    let raw = payload.name.ok_or_else(|| missing_field_error(NAME))?;
    rename_label(state, &owner, kind, id, parse_name(&raw)?).await
}

/// Partial update: without a `name` the label is returned unchanged.
async fn patch_label(
    state: &HttpState,
    session: &SessionContext,
    kind: LabelKind,
    path: LabelPath,
    payload: LabelRequest,
) -> ApiResult<web::Json<LabelResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_label_id(kind, path)?;
    if let Some(raw) = payload.name {
        return rename_label(state, &owner, kind, id, parse_name(&raw)?).await;
    }
    let label = state.labels_query.get(&owner, kind, id).await?;
    Ok(web::Json(LabelResponse::from(label)))
}

async fn delete_label(
    state: &HttpState,
    session: &SessionContext,
    kind: LabelKind,
    path: LabelPath,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_label_id(kind, path)?;
    state.labels.delete(&owner, kind, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List the caller's tags ordered by name, descending.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    params(LabelListQuery),
    responses(
        (status = 200, description = "Tags owned by the caller", body = [LabelResponse]),
        (status = 400, description = "Invalid flag", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["labels"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<LabelListQuery>,
) -> ApiResult<web::Json<Vec<LabelResponse>>> {
    list_labels(&state, &session, LabelKind::Tag, query.into_inner()).await
}

/// Rename a tag. `name` is required.
#[utoipa::path(
    put,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    request_body = LabelRequest,
    responses(
        (status = 200, description = "Updated tag", body = LabelResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["labels"],
    operation_id = "replaceTag"
)]
#[put("/tags/{id}")]
pub async fn replace_tag(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<LabelPath>,
    payload: web::Json<LabelRequest>,
) -> ApiResult<web::Json<LabelResponse>> {
    replace_label(
        &state,
        &session,
        LabelKind::Tag,
        path.into_inner(),
        payload.into_inner(),
    )
    .await
}

/// Partially update a tag.
#[utoipa::path(
    patch,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    request_body = LabelRequest,
    responses(
        (status = 200, description = "Updated tag", body = LabelResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["labels"],
    operation_id = "updateTag"
)]
#[patch("/tags/{id}")]
pub async fn update_tag(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<LabelPath>,
    payload: web::Json<LabelRequest>,
) -> ApiResult<web::Json<LabelResponse>> {
    patch_label(
        &state,
        &session,
        LabelKind::Tag,
        path.into_inner(),
        payload.into_inner(),
    )
    .await
}

/// Delete a tag and detach it from every recipe.
#[utoipa::path(
    delete,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["labels"],
    operation_id = "deleteTag"
)]
#[delete("/tags/{id}")]
pub async fn delete_tag(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<LabelPath>,
) -> ApiResult<HttpResponse> {
    delete_label(&state, &session, LabelKind::Tag, path.into_inner()).await
}

/// List the caller's ingredients ordered by name, descending.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    params(LabelListQuery),
    responses(
        (status = 200, description = "Ingredients owned by the caller", body = [LabelResponse]),
        (status = 400, description = "Invalid flag", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["labels"],
    operation_id = "listIngredients"
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<LabelListQuery>,
) -> ApiResult<web::Json<Vec<LabelResponse>>> {
    list_labels(&state, &session, LabelKind::Ingredient, query.into_inner()).await
}

/// Rename an ingredient. `name` is required.
#[utoipa::path(
    put,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    request_body = LabelRequest,
    responses(
        (status = 200, description = "Updated ingredient", body = LabelResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["labels"],
    operation_id = "replaceIngredient"
)]
#[put("/ingredients/{id}")]
pub async fn replace_ingredient(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<LabelPath>,
    payload: web::Json<LabelRequest>,
) -> ApiResult<web::Json<LabelResponse>> {
    replace_label(
        &state,
        &session,
        LabelKind::Ingredient,
        path.into_inner(),
        payload.into_inner(),
    )
    .await
}

/// Partially update an ingredient.
#[utoipa::path(
    patch,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    request_body = LabelRequest,
    responses(
        (status = 200, description = "Updated ingredient", body = LabelResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["labels"],
    operation_id = "updateIngredient"
)]
#[patch("/ingredients/{id}")]
pub async fn update_ingredient(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<LabelPath>,
    payload: web::Json<LabelRequest>,
) -> ApiResult<web::Json<LabelResponse>> {
    patch_label(
        &state,
        &session,
        LabelKind::Ingredient,
        path.into_inner(),
        payload.into_inner(),
    )
    .await
}

/// Delete an ingredient and detach it from every recipe.
#[utoipa::path(
    delete,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["labels"],
    operation_id = "deleteIngredient"
)]
#[delete("/ingredients/{id}")]
pub async fn delete_ingredient(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<LabelPath>,
) -> ApiResult<HttpResponse> {
    delete_label(&state, &session, LabelKind::Ingredient, path.into_inner()).await
}

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;

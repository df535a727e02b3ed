//! Recipe API handlers.
//!
//! ```text
//! GET    /api/v1/recipes?tags=1,2&ingredients=3
//! POST   /api/v1/recipes {"title":"Curry","timeMinutes":30,"price":"5.50","tags":[{"name":"Thai"}]}
//! GET    /api/v1/recipes/{id}
//! PUT    /api/v1/recipes/{id}
//! PATCH  /api/v1/recipes/{id} {"tags":[]}
//! DELETE /api/v1/recipes/{id}
//! ```
//!
//! Every handler is scoped to the session user; another user's recipe id
//! answers 404.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub use super::recipes_dto::{
    LabelPayload, LabelResponse, RecipeDetailResponse, RecipeListQuery, RecipeRequest,
    RecipeSummaryResponse,
};
use super::recipes_dto::{
    RecipePath, parse_create_request, parse_list_query, parse_patch_request, parse_recipe_id,
    parse_replace_request,
};

/// List the caller's recipes, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(RecipeListQuery),
    responses(
        (status = 200, description = "Recipes owned by the caller", body = [RecipeSummaryResponse]),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RecipeListQuery>,
) -> ApiResult<web::Json<Vec<RecipeSummaryResponse>>> {
    let owner = session.require_user_id()?;
    let filter = parse_list_query(query.into_inner())?;
    let recipes = state.recipes_query.list(&owner, filter).await?;
    Ok(web::Json(
        recipes
            .into_iter()
            .map(RecipeSummaryResponse::from)
            .collect(),
    ))
}

/// Create a recipe owned by the caller, resolving tags and ingredients by name.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Created recipe", body = RecipeDetailResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let request = parse_create_request(payload.into_inner())?;
    let recipe = state.recipes.create(&owner, request).await?;
    Ok(HttpResponse::Created().json(RecipeDetailResponse::from(recipe)))
}

/// Fetch one of the caller's recipes.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeDetailResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<RecipePath>,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_recipe_id(path.into_inner())?;
    let recipe = state.recipes_query.get(&owner, id).await?;
    Ok(web::Json(RecipeDetailResponse::from(recipe)))
}

/// Replace a recipe. `title`, `timeMinutes` and `price` are required.
#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeDetailResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "replaceRecipe"
)]
#[put("/recipes/{id}")]
pub async fn replace_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<RecipePath>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_recipe_id(path.into_inner())?;
    let request = parse_replace_request(payload.into_inner())?;
    let recipe = state.recipes.update(&owner, id, request).await?;
    Ok(web::Json(RecipeDetailResponse::from(recipe)))
}

/// Partially update a recipe. A supplied `tags` or `ingredients` list
/// replaces that association set; an empty list clears it.
#[utoipa::path(
    patch,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeDetailResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[patch("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<RecipePath>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_recipe_id(path.into_inner())?;
    let request = parse_patch_request(payload.into_inner())?;
    let recipe = state.recipes.update(&owner, id, request).await?;
    Ok(web::Json(RecipeDetailResponse::from(recipe)))
}

/// Delete one of the caller's recipes.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<RecipePath>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_recipe_id(path.into_inner())?;
    state.recipes.delete(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;

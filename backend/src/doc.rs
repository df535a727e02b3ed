//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every `/api/v1` endpoint plus the health checks
//! - **Schemas**: request and response DTOs and the shared error payload
//! - **Security**: Session cookie authentication scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::labels::LabelRequest;
use crate::inbound::http::recipes::{
    LabelPayload, LabelResponse, RecipeDetailResponse, RecipeRequest, RecipeSummaryResponse,
};
use crate::inbound::http::users::{LoginRequest, ProfileRequest, RegisterRequest, UserResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe API",
        description = "Session-authenticated recipes with owner-scoped tags and ingredients."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_current_user,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::replace_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::labels::list_tags,
        crate::inbound::http::labels::replace_tag,
        crate::inbound::http::labels::update_tag,
        crate::inbound::http::labels::delete_tag,
        crate::inbound::http::labels::list_ingredients,
        crate::inbound::http::labels::replace_ingredient,
        crate::inbound::http::labels::update_ingredient,
        crate::inbound::http::labels::delete_ingredient,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        ProfileRequest,
        UserResponse,
        RecipeRequest,
        LabelPayload,
        LabelRequest,
        LabelResponse,
        RecipeSummaryResponse,
        RecipeDetailResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "users", description = "Registration, sessions and profiles"),
        (name = "recipes", description = "Recipes owned by the caller"),
        (name = "labels", description = "Tags and ingredients owned by the caller"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

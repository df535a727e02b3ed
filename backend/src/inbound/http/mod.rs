//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod labels;
pub mod recipes;
mod recipes_dto;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` route and the extractor error handlers.
///
/// Mount inside a scope that is wrapped by the session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use recipe_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(users::update_current_user)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(recipes::get_recipe)
        .service(recipes::replace_recipe)
        .service(recipes::update_recipe)
        .service(recipes::delete_recipe)
        .service(labels::list_tags)
        .service(labels::replace_tag)
        .service(labels::update_tag)
        .service(labels::delete_tag)
        .service(labels::list_ingredients)
        .service(labels::replace_ingredient)
        .service(labels::update_ingredient)
        .service(labels::delete_ingredient);
}

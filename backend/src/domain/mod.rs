//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants in each
//! type's Rustdoc. Services implement the driving ports in [`ports`] on top
//! of the driven repository ports.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): account identity and flags.
//! - Recipe (alias to `recipe::Recipe`): recipe with its tags and ingredients.
//! - Label (alias to `label::Label`): a tag or ingredient.

pub mod auth;
pub mod error;
pub mod label;
mod label_reconciler;
mod label_service;
pub mod password;
pub mod ports;
pub mod recipe;
mod recipe_service;
pub mod trace_id;
pub mod user;
mod user_account_service;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN_LEN, Password, PasswordValidationError,
    ProfileUpdate, Registration,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::label::{
    LABEL_NAME_MAX, Label, LabelId, LabelKind, LabelName, LabelValidationError, UnknownLabelKind,
};
pub use self::label_reconciler::LabelReconciler;
pub use self::label_service::LabelService;
pub use self::password::PasswordHash;
pub use self::recipe::{
    LabelAssignment, LabelNames, PRICE_SCALE, Price, RECIPE_FIELD_MAX, Recipe, RecipeChanges,
    RecipeDraft, RecipeFilter, RecipeId, RecipeLink, RecipeTitle, RecipeValidationError,
    TimeMinutes,
};
pub use self::recipe_service::RecipeService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, USER_FIELD_MAX, User, UserChanges, UserCredentials, UserId, UserName,
    UserRoles, UserValidationError,
};
pub use self::user_account_service::UserAccountService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use recipe_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such recipe"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

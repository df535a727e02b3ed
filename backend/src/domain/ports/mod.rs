//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters. Driving
//! ports (`LoginService`, `UserAccounts`, `Recipes*`, `Labels*`) are
//! implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod label_repository;
mod labels_command;
mod labels_query;
mod login_service;
mod recipe_repository;
mod recipes_command;
mod recipes_query;
mod user_accounts;
mod user_repository;

#[cfg(test)]
pub use label_repository::MockLabelRepository;
pub use label_repository::{LabelRepository, LabelRepositoryError};
pub use labels_command::LabelsCommand;
#[cfg(test)]
pub use labels_command::MockLabelsCommand;
#[cfg(test)]
pub use labels_query::MockLabelsQuery;
pub use labels_query::LabelsQuery;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use recipes_command::MockRecipesCommand;
pub use recipes_command::{CreateRecipeRequest, RecipesCommand, UpdateRecipeRequest};
#[cfg(test)]
pub use recipes_query::MockRecipesQuery;
pub use recipes_query::RecipesQuery;
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::UserAccounts;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

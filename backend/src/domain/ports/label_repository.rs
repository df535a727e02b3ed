//! Port for owner-scoped tag and ingredient persistence.

use async_trait::async_trait;

use crate::domain::{Label, LabelId, LabelKind, LabelName, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by label repository adapters.
    pub enum LabelRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "label repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "label repository query failed: {message}",
    }
}

/// Storage for tags and ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelRepository: Send + Sync {
    /// List the owner's labels of one kind ordered by name descending.
    ///
    /// With `assigned_only`, only labels attached to at least one recipe are
    /// returned, each at most once.
    async fn list(
        &self,
        owner: &UserId,
        kind: LabelKind,
        assigned_only: bool,
    ) -> Result<Vec<Label>, LabelRepositoryError>;

    /// Fetch one of the owner's labels of `kind` by id.
    async fn find(
        &self,
        owner: &UserId,
        kind: LabelKind,
        id: LabelId,
    ) -> Result<Option<Label>, LabelRepositoryError>;

    /// Find the owner's label with exactly this name.
    async fn find_by_name(
        &self,
        owner: &UserId,
        kind: LabelKind,
        name: &LabelName,
    ) -> Result<Option<Label>, LabelRepositoryError>;

    /// Create a label for the owner.
    async fn create(
        &self,
        owner: &UserId,
        kind: LabelKind,
        name: &LabelName,
    ) -> Result<Label, LabelRepositoryError>;

    /// Rename one of the owner's labels; `None` when it does not exist.
    async fn rename(
        &self,
        owner: &UserId,
        kind: LabelKind,
        id: LabelId,
        name: &LabelName,
    ) -> Result<Option<Label>, LabelRepositoryError>;

    /// Delete one of the owner's labels and its recipe links. Returns
    /// `false` when it does not exist.
    async fn delete(
        &self,
        owner: &UserId,
        kind: LabelKind,
        id: LabelId,
    ) -> Result<bool, LabelRepositoryError>;
}

//! Driving port for listing tags and ingredients.

use async_trait::async_trait;

use crate::domain::{Error, Label, LabelId, LabelKind, UserId};

/// Domain use-case port for label reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelsQuery: Send + Sync {
    /// List the owner's labels of `kind`, ordered by name descending.
    async fn list(
        &self,
        owner: &UserId,
        kind: LabelKind,
        assigned_only: bool,
    ) -> Result<Vec<Label>, Error>;

    /// Fetch one of the owner's labels; another user's id is not found.
    async fn get(&self, owner: &UserId, kind: LabelKind, id: LabelId) -> Result<Label, Error>;
}

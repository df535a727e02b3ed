//! Driving port for renaming and deleting tags and ingredients.
//!
//! Labels are only ever created through recipe reconciliation, so there is
//! no create operation here.

use async_trait::async_trait;

use crate::domain::{Error, Label, LabelId, LabelKind, LabelName, UserId};

/// Domain use-case port for label mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelsCommand: Send + Sync {
    /// Rename one of the owner's labels.
    async fn rename(
        &self,
        owner: &UserId,
        kind: LabelKind,
        id: LabelId,
        name: LabelName,
    ) -> Result<Label, Error>;

    /// Delete one of the owner's labels, detaching it from every recipe.
    async fn delete(&self, owner: &UserId, kind: LabelKind, id: LabelId) -> Result<(), Error>;
}

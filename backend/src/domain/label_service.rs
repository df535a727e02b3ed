//! Tag and ingredient services.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::label_reconciler::map_label_repository_error;
use crate::domain::ports::{LabelRepository, LabelsCommand, LabelsQuery};
use crate::domain::{Error, Label, LabelId, LabelKind, LabelName, UserId};

fn label_not_found(kind: LabelKind, id: LabelId) -> Error {
    Error::not_found(format!("{kind} {id} not found"))
}

/// Label service implementing the query and command driving ports for both
/// tags and ingredients.
#[derive(Clone)]
pub struct LabelService<L> {
    labels: Arc<L>,
}

impl<L> LabelService<L> {
    /// Create a new service over the label repository.
    pub fn new(labels: Arc<L>) -> Self {
        Self { labels }
    }
}

#[async_trait]
impl<L> LabelsQuery for LabelService<L>
where
    L: LabelRepository,
{
    async fn list(
        &self,
        owner: &UserId,
        kind: LabelKind,
        assigned_only: bool,
    ) -> Result<Vec<Label>, Error> {
        self.labels
            .list(owner, kind, assigned_only)
            .await
            .map_err(map_label_repository_error)
    }

    async fn get(&self, owner: &UserId, kind: LabelKind, id: LabelId) -> Result<Label, Error> {
        self.labels
            .find(owner, kind, id)
            .await
            .map_err(map_label_repository_error)?
            .ok_or_else(|| label_not_found(kind, id))
    }
}

#[async_trait]
impl<L> LabelsCommand for LabelService<L>
where
    L: LabelRepository,
{
    async fn rename(
        &self,
        owner: &UserId,
        kind: LabelKind,
        id: LabelId,
        name: LabelName,
    ) -> Result<Label, Error> {
        self.labels
            .rename(owner, kind, id, &name)
            .await
            .map_err(map_label_repository_error)?
            .ok_or_else(|| label_not_found(kind, id))
    }

    async fn delete(&self, owner: &UserId, kind: LabelKind, id: LabelId) -> Result<(), Error> {
        let deleted = self
            .labels
            .delete(owner, kind, id)
            .await
            .map_err(map_label_repository_error)?;
        if !deleted {
            return Err(label_not_found(kind, id));
        }
        info!(user_id = %owner, %kind, label_id = %id, "label deleted");
        Ok(())
    }
}

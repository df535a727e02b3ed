//! Resolve tag and ingredient names to the owner's label ids.
//!
//! Each name reuses the owner's existing label of that kind when one matches
//! exactly, otherwise a new label is created. Labels belonging to other users
//! are never matched.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{LabelRepository, LabelRepositoryError};
use crate::domain::{Error, LabelAssignment, LabelId, LabelKind, LabelName, LabelNames, UserId};

pub(crate) fn map_label_repository_error(error: LabelRepositoryError) -> Error {
    match error {
        LabelRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("label repository unavailable: {message}"))
        }
        LabelRepositoryError::Query { message } => {
            Error::internal(format!("label repository error: {message}"))
        }
    }
}

/// Get-or-create resolver over a [`LabelRepository`].
#[derive(Clone)]
pub struct LabelReconciler<L> {
    labels: Arc<L>,
}

impl<L> LabelReconciler<L> {
    /// Create a reconciler over the label repository.
    pub fn new(labels: Arc<L>) -> Self {
        Self { labels }
    }
}

impl<L> LabelReconciler<L>
where
    L: LabelRepository,
{
    /// Resolve `names` to ids, preserving first-seen order and dropping
    /// duplicate names.
    pub async fn resolve(
        &self,
        owner: &UserId,
        kind: LabelKind,
        names: &[LabelName],
    ) -> Result<Vec<LabelId>, Error> {
        let mut seen = HashSet::with_capacity(names.len());
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            if !seen.insert(name) {
                continue;
            }
            let existing = self
                .labels
                .find_by_name(owner, kind, name)
                .await
                .map_err(map_label_repository_error)?;
            let label = match existing {
                Some(label) => label,
                None => {
                    let created = self
                        .labels
                        .create(owner, kind, name)
                        .await
                        .map_err(map_label_repository_error)?;
                    debug!(%kind, label_id = %created.id, "label created during reconciliation");
                    created
                }
            };
            ids.push(label.id);
        }
        Ok(ids)
    }

    /// Resolve both kinds, keeping absent lists absent.
    pub async fn resolve_all(
        &self,
        owner: &UserId,
        names: &LabelNames,
    ) -> Result<LabelAssignment, Error> {
        let tags = match &names.tags {
            Some(tags) => Some(self.resolve(owner, LabelKind::Tag, tags).await?),
            None => None,
        };
        let ingredients = match &names.ingredients {
            Some(ingredients) => Some(
                self.resolve(owner, LabelKind::Ingredient, ingredients)
                    .await?,
            ),
            None => None,
        };
        Ok(LabelAssignment { tags, ingredients })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockLabelRepository;
    use crate::domain::{ErrorCode, Label};
    use mockall::Sequence;
    use rstest::rstest;

    fn name(raw: &str) -> LabelName {
        LabelName::new(raw).expect("fixture name")
    }

    fn label(id: i64, kind: LabelKind, raw: &str) -> Label {
        Label {
            id: LabelId::new(id),
            kind,
            name: name(raw),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn existing_labels_are_reused_and_missing_ones_created() {
        let owner = UserId::random();
        let mut repo = MockLabelRepository::new();
        let mut seq = Sequence::new();
        repo.expect_find_by_name()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|_, _, n| n.as_ref() == "Thai")
            .return_once(|_, kind, _| Ok(Some(label(7, kind, "Thai"))));
        repo.expect_find_by_name()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|_, _, n| n.as_ref() == "Dinner")
            .return_once(|_, _, _| Ok(None));
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|_, kind, n| *kind == LabelKind::Tag && n.as_ref() == "Dinner")
            .return_once(|_, kind, n| Ok(label(8, kind, n.as_ref())));

        let reconciler = LabelReconciler::new(Arc::new(repo));
        let ids = reconciler
            .resolve(&owner, LabelKind::Tag, &[name("Thai"), name("Dinner")])
            .await
            .expect("resolution succeeds");

        assert_eq!(ids, vec![LabelId::new(7), LabelId::new(8)]);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_names_resolve_once() {
        let owner = UserId::random();
        let mut repo = MockLabelRepository::new();
        repo.expect_find_by_name()
            .times(1)
            .return_once(|_, kind, _| Ok(Some(label(3, kind, "Salt"))));

        let reconciler = LabelReconciler::new(Arc::new(repo));
        let ids = reconciler
            .resolve(&owner, LabelKind::Ingredient, &[name("Salt"), name(" Salt ")])
            .await
            .expect("resolution succeeds");

        assert_eq!(ids, vec![LabelId::new(3)]);
    }

    #[rstest]
    #[tokio::test]
    async fn absent_lists_stay_absent_and_empty_lists_stay_empty() {
        let owner = UserId::random();
        let mut repo = MockLabelRepository::new();
        repo.expect_find_by_name().times(0);
        repo.expect_create().times(0);

        let reconciler = LabelReconciler::new(Arc::new(repo));
        let assignment = reconciler
            .resolve_all(
                &owner,
                &LabelNames {
                    tags: None,
                    ingredients: Some(Vec::new()),
                },
            )
            .await
            .expect("resolution succeeds");

        assert_eq!(assignment.tags, None);
        assert_eq!(assignment.ingredients, Some(Vec::new()));
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_surface_as_service_unavailable() {
        let owner = UserId::random();
        let mut repo = MockLabelRepository::new();
        repo.expect_find_by_name()
            .times(1)
            .return_once(|_, _, _| Err(LabelRepositoryError::connection("refused")));

        let reconciler = LabelReconciler::new(Arc::new(repo));
        let error = reconciler
            .resolve(&owner, LabelKind::Tag, &[name("Vegan")])
            .await
            .expect_err("repository failure");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}

//! In-process adapter implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP and integration
//! tests. State lives behind one `std::sync::Mutex`; the guard is never held
//! across an `.await`.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    LabelRepository, LabelRepositoryError, RecipeRepository, RecipeRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    EmailAddress, Label, LabelAssignment, LabelId, LabelKind, LabelName, NewUser, Recipe,
    RecipeChanges, RecipeDraft, RecipeFilter, RecipeId, User, UserChanges, UserCredentials,
    UserId, UserRoles,
};

#[derive(Debug, Clone)]
struct StoredRecipe {
    owner: Uuid,
    draft: RecipeDraft,
}

#[derive(Debug, Clone)]
struct StoredLabel {
    owner: Uuid,
    label: Label,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, UserCredentials>,
    recipes: BTreeMap<i64, StoredRecipe>,
    labels: BTreeMap<i64, StoredLabel>,
    /// `(recipe_id, label_id)` pairs.
    links: BTreeSet<(i64, i64)>,
    next_recipe_id: i64,
    next_label_id: i64,
}

impl State {
    fn email_taken(&self, email: &EmailAddress, except: Option<&Uuid>) -> bool {
        self.users
            .iter()
            .any(|(id, stored)| Some(id) != except && stored.user.email() == email)
    }

    fn owned_recipe(&self, owner: &UserId, id: RecipeId) -> Option<&StoredRecipe> {
        self.recipes
            .get(&id.get())
            .filter(|stored| &stored.owner == owner.as_uuid())
    }

    fn owned_label(&self, owner: &UserId, kind: LabelKind, id: LabelId) -> Option<&StoredLabel> {
        self.labels
            .get(&id.get())
            .filter(|stored| &stored.owner == owner.as_uuid() && stored.label.kind == kind)
    }

    fn labels_of(&self, recipe_id: i64, kind: LabelKind) -> Vec<Label> {
        self.links
            .range((recipe_id, i64::MIN)..=(recipe_id, i64::MAX))
            .filter_map(|(_, label_id)| self.labels.get(label_id))
            .filter(|stored| stored.label.kind == kind)
            .map(|stored| stored.label.clone())
            .collect()
    }

    fn has_any(&self, recipe_id: i64, ids: &[LabelId], kind: LabelKind) -> bool {
        ids.iter().any(|id| {
            self.links.contains(&(recipe_id, id.get()))
                && self
                    .labels
                    .get(&id.get())
                    .is_some_and(|stored| stored.label.kind == kind)
        })
    }

    fn assemble(&self, id: i64, stored: &StoredRecipe) -> Recipe {
        let draft = stored.draft.clone();
        Recipe {
            id: RecipeId::new(id),
            title: draft.title,
            time_minutes: draft.time_minutes,
            price: draft.price,
            description: draft.description,
            link: draft.link,
            tags: self.labels_of(id, LabelKind::Tag),
            ingredients: self.labels_of(id, LabelKind::Ingredient),
        }
    }

    fn replace_links(&mut self, recipe_id: i64, kind: LabelKind, ids: &[LabelId]) {
        let labels = &self.labels;
        self.links.retain(|(recipe, label)| {
            *recipe != recipe_id
                || labels
                    .get(label)
                    .is_some_and(|stored| stored.label.kind != kind)
        });
        self.links
            .extend(ids.iter().map(|label_id| (recipe_id, label_id.get())));
    }
}

/// Shared in-memory store. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<E>(&self, poisoned: impl FnOnce(&'static str) -> E) -> Result<MutexGuard<'_, State>, E> {
        self.state
            .lock()
            .map_err(|_| poisoned("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        if state.email_taken(&user.email, None) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let created = User::new(
            UserId::random(),
            user.email.clone(),
            user.name.clone(),
            true,
            user.roles,
        );
        state.users.insert(
            *created.id().as_uuid(),
            UserCredentials {
                user: created.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state
            .users
            .get(id.as_uuid())
            .map(|stored| stored.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state
            .users
            .values()
            .find(|stored| stored.user.email() == email)
            .cloned())
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        if let Some(email) = &changes.email {
            if state.email_taken(email, Some(id.as_uuid())) {
                return Err(UserPersistenceError::duplicate_email(email.as_ref()));
            }
        }
        let Some(stored) = state.users.get_mut(id.as_uuid()) else {
            return Ok(None);
        };
        let current = &stored.user;
        let updated = User::new(
            current.id().clone(),
            changes.email.clone().unwrap_or_else(|| current.email().clone()),
            changes.name.clone().unwrap_or_else(|| current.name().clone()),
            current.is_active(),
            UserRoles {
                is_staff: current.is_staff(),
                is_superuser: current.is_superuser(),
            },
        );
        stored.user = updated.clone();
        if let Some(hash) = &changes.password_hash {
            stored.password_hash = hash.clone();
        }
        Ok(Some(updated))
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn list(
        &self,
        owner: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let state = self.lock(RecipeRepositoryError::query)?;
        Ok(state
            .recipes
            .iter()
            .rev()
            .filter(|(_, stored)| &stored.owner == owner.as_uuid())
            .filter(|(id, _)| {
                filter
                    .tag_ids
                    .as_deref()
                    .is_none_or(|ids| state.has_any(**id, ids, LabelKind::Tag))
            })
            .filter(|(id, _)| {
                filter
                    .ingredient_ids
                    .as_deref()
                    .is_none_or(|ids| state.has_any(**id, ids, LabelKind::Ingredient))
            })
            .map(|(id, stored)| state.assemble(*id, stored))
            .collect())
    }

    async fn find(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let state = self.lock(RecipeRepositoryError::query)?;
        Ok(state
            .owned_recipe(owner, id)
            .map(|stored| state.assemble(id.get(), stored)))
    }

    async fn insert(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
        assignment: &LabelAssignment,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        let mut state = self.lock(RecipeRepositoryError::query)?;
        state.next_recipe_id += 1;
        let id = state.next_recipe_id;
        state.recipes.insert(
            id,
            StoredRecipe {
                owner: *owner.as_uuid(),
                draft: draft.clone(),
            },
        );
        for ids in [&assignment.tags, &assignment.ingredients]
            .into_iter()
            .flatten()
        {
            state
                .links
                .extend(ids.iter().map(|label_id| (id, label_id.get())));
        }
        Ok(RecipeId::new(id))
    }

    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: &RecipeChanges,
        assignment: &LabelAssignment,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock(RecipeRepositoryError::query)?;
        if state.owned_recipe(owner, id).is_none() {
            return Ok(false);
        }
        if let Some(stored) = state.recipes.get_mut(&id.get()) {
            let draft = &mut stored.draft;
            if let Some(title) = &changes.title {
                draft.title = title.clone();
            }
            if let Some(time_minutes) = changes.time_minutes {
                draft.time_minutes = time_minutes;
            }
            if let Some(price) = &changes.price {
                draft.price = price.clone();
            }
            if let Some(description) = &changes.description {
                draft.description = description.clone();
            }
            if let Some(link) = &changes.link {
                draft.link = link.clone();
            }
        }
        if let Some(tags) = &assignment.tags {
            state.replace_links(id.get(), LabelKind::Tag, tags);
        }
        if let Some(ingredients) = &assignment.ingredients {
            state.replace_links(id.get(), LabelKind::Ingredient, ingredients);
        }
        Ok(true)
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock(RecipeRepositoryError::query)?;
        if state.owned_recipe(owner, id).is_none() {
            return Ok(false);
        }
        state.recipes.remove(&id.get());
        state.links.retain(|(recipe, _)| *recipe != id.get());
        Ok(true)
    }
}

#[async_trait]
impl LabelRepository for MemoryStore {
    async fn list(
        &self,
        owner: &UserId,
        kind: LabelKind,
        assigned_only: bool,
    ) -> Result<Vec<Label>, LabelRepositoryError> {
        let state = self.lock(LabelRepositoryError::query)?;
        let mut labels: Vec<Label> = state
            .labels
            .iter()
            .filter(|(_, stored)| &stored.owner == owner.as_uuid() && stored.label.kind == kind)
            .filter(|(id, _)| {
                !assigned_only || state.links.iter().any(|(_, label)| label == *id)
            })
            .map(|(_, stored)| stored.label.clone())
            .collect();
        // Byte order, matching the `C` collation on `labels.name`.
        labels.sort_by(|a, b| {
            b.name
                .as_ref()
                .cmp(a.name.as_ref())
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(labels)
    }

    async fn find(
        &self,
        owner: &UserId,
        kind: LabelKind,
        id: LabelId,
    ) -> Result<Option<Label>, LabelRepositoryError> {
        let state = self.lock(LabelRepositoryError::query)?;
        Ok(state
            .owned_label(owner, kind, id)
            .map(|stored| stored.label.clone()))
    }

    async fn find_by_name(
        &self,
        owner: &UserId,
        kind: LabelKind,
        name: &LabelName,
    ) -> Result<Option<Label>, LabelRepositoryError> {
        let state = self.lock(LabelRepositoryError::query)?;
        Ok(state
            .labels
            .values()
            .find(|stored| {
                &stored.owner == owner.as_uuid()
                    && stored.label.kind == kind
                    && &stored.label.name == name
            })
            .map(|stored| stored.label.clone()))
    }

    async fn create(
        &self,
        owner: &UserId,
        kind: LabelKind,
        name: &LabelName,
    ) -> Result<Label, LabelRepositoryError> {
        let mut state = self.lock(LabelRepositoryError::query)?;
        state.next_label_id += 1;
        let label = Label {
            id: LabelId::new(state.next_label_id),
            kind,
            name: name.clone(),
        };
        state.labels.insert(
            label.id.get(),
            StoredLabel {
                owner: *owner.as_uuid(),
                label: label.clone(),
            },
        );
        Ok(label)
    }

    async fn rename(
        &self,
        owner: &UserId,
        kind: LabelKind,
        id: LabelId,
        name: &LabelName,
    ) -> Result<Option<Label>, LabelRepositoryError> {
        let mut state = self.lock(LabelRepositoryError::query)?;
        if state.owned_label(owner, kind, id).is_none() {
            return Ok(None);
        }
        Ok(state.labels.get_mut(&id.get()).map(|stored| {
            stored.label.name = name.clone();
            stored.label.clone()
        }))
    }

    async fn delete(
        &self,
        owner: &UserId,
        kind: LabelKind,
        id: LabelId,
    ) -> Result<bool, LabelRepositoryError> {
        let mut state = self.lock(LabelRepositoryError::query)?;
        if state.owned_label(owner, kind, id).is_none() {
            return Ok(false);
        }
        state.labels.remove(&id.get());
        state.links.retain(|(_, label)| *label != id.get());
        Ok(true)
    }
}

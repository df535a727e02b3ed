//! Integration tests for `DieselRecipeRepository` against embedded PostgreSQL.
//!
//! These exercise the SQL the in-memory store cannot: owner scoping in the
//! `WHERE` clauses, link replacement per label kind, `eq_any` filters and the
//! insert transaction.

use recipe_backend::domain::ports::{LabelRepository, RecipeRepository};
use recipe_backend::domain::{
    Label, LabelAssignment, LabelId, LabelKind, LabelName, Price, RecipeChanges, RecipeDraft,
    RecipeFilter, RecipeId, RecipeLink, RecipeTitle, TimeMinutes, UserId,
};
use recipe_backend::outbound::persistence::{DieselLabelRepository, DieselRecipeRepository};
use rstest::{fixture, rstest};

mod support;

use support::{DbContext, db_context_or_skip};

struct Repos {
    recipes: DieselRecipeRepository,
    labels: DieselLabelRepository,
}

impl Repos {
    fn new(db: &DbContext) -> Self {
        Self {
            recipes: DieselRecipeRepository::new(db.pool.clone()),
            labels: DieselLabelRepository::new(db.pool.clone()),
        }
    }

    async fn label(&self, owner: &UserId, kind: LabelKind, name: &str) -> Label {
        let name = LabelName::new(name).expect("fixture name");
        self.labels.create(owner, kind, &name).await.expect("create label")
    }
}

#[fixture]
fn db() -> Option<DbContext> {
    db_context_or_skip()
}

fn draft(title: &str) -> RecipeDraft {
    RecipeDraft {
        title: RecipeTitle::new(title).expect("fixture title"),
        time_minutes: TimeMinutes::new(15).expect("fixture time"),
        price: Price::parse("4.50").expect("fixture price"),
        description: "Stir well.".to_owned(),
        link: RecipeLink::new("https://recipes.test/soup").expect("fixture link"),
    }
}

fn labels(tags: &[&Label], ingredients: &[&Label]) -> LabelAssignment {
    LabelAssignment {
        tags: Some(tags.iter().map(|label| label.id).collect()),
        ingredients: Some(ingredients.iter().map(|label| label.id).collect()),
    }
}

fn names(labels: &[Label]) -> Vec<&str> {
    labels.iter().map(|label| label.name.as_ref()).collect()
}

#[rstest]
fn recipes_are_scoped_to_their_owner(db: Option<DbContext>) {
    let Some(db) = db else {
        eprintln!("SKIP-TEST-CLUSTER: recipes_are_scoped_to_their_owner skipped");
        return;
    };
    let alice = db.seed_user("alice@example.com");
    let bob = db.seed_user("bob@example.com");
    let repos = Repos::new(&db);
    let none = LabelAssignment::default();

    db.runtime.block_on(async {
        let first = repos.recipes.insert(&alice, &draft("Soup"), &none).await.expect("insert");
        let second = repos.recipes.insert(&alice, &draft("Stew"), &none).await.expect("insert");
        let foreign = repos.recipes.insert(&bob, &draft("Curry"), &none).await.expect("insert");

        let listed = repos
            .recipes
            .list(&alice, &RecipeFilter::default())
            .await
            .expect("list");
        let ids: Vec<RecipeId> = listed.iter().map(|recipe| recipe.id).collect();
        assert_eq!(ids, vec![second, first]);

        let stored = repos.recipes.find(&alice, first).await.expect("find").expect("present");
        assert_eq!(stored.price.to_string(), "4.50");
        assert_eq!(stored.description, "Stir well.");

        assert!(repos.recipes.find(&alice, foreign).await.expect("find").is_none());
        let rename = RecipeChanges {
            title: Some(RecipeTitle::new("Mine now").expect("fixture title")),
            ..RecipeChanges::default()
        };
        assert!(!repos.recipes.update(&alice, foreign, &rename, &none).await.expect("update"));
        assert!(!repos.recipes.delete(&alice, foreign).await.expect("delete"));

        let untouched = repos.recipes.find(&bob, foreign).await.expect("find").expect("present");
        assert_eq!(untouched.title.as_ref(), "Curry");
    });
}

#[rstest]
fn supplied_lists_replace_links_of_their_kind_only(db: Option<DbContext>) {
    let Some(db) = db else {
        eprintln!("SKIP-TEST-CLUSTER: supplied_lists_replace_links_of_their_kind_only skipped");
        return;
    };
    let owner = db.seed_user("cook@example.com");
    let repos = Repos::new(&db);

    db.runtime.block_on(async {
        let breakfast = repos.label(&owner, LabelKind::Tag, "Breakfast").await;
        let lunch = repos.label(&owner, LabelKind::Tag, "Lunch").await;
        let salt = repos.label(&owner, LabelKind::Ingredient, "Salt").await;
        let id = repos
            .recipes
            .insert(&owner, &draft("Eggs"), &labels(&[&breakfast], &[&salt]))
            .await
            .expect("insert");

        let swap_tags = LabelAssignment {
            tags: Some(vec![lunch.id]),
            ingredients: None,
        };
        let title_only = RecipeChanges {
            title: Some(RecipeTitle::new("Scrambled eggs").expect("fixture title")),
            ..RecipeChanges::default()
        };
        assert!(repos.recipes.update(&owner, id, &title_only, &swap_tags).await.expect("update"));

        let recipe = repos.recipes.find(&owner, id).await.expect("find").expect("present");
        assert_eq!(recipe.title.as_ref(), "Scrambled eggs");
        assert_eq!(recipe.link.as_ref(), "https://recipes.test/soup");
        assert_eq!(names(&recipe.tags), vec!["Lunch"]);
        assert_eq!(names(&recipe.ingredients), vec!["Salt"]);

        let clear_ingredients = LabelAssignment {
            tags: None,
            ingredients: Some(Vec::new()),
        };
        assert!(
            repos
                .recipes
                .update(&owner, id, &RecipeChanges::default(), &clear_ingredients)
                .await
                .expect("update")
        );
        let recipe = repos.recipes.find(&owner, id).await.expect("find").expect("present");
        assert_eq!(names(&recipe.tags), vec!["Lunch"]);
        assert!(recipe.ingredients.is_empty());

        let kept = repos
            .labels
            .list(&owner, LabelKind::Tag, false)
            .await
            .expect("list");
        assert_eq!(names(&kept), vec!["Lunch", "Breakfast"]);
    });
}

#[rstest]
fn filters_return_each_matching_recipe_once(db: Option<DbContext>) {
    let Some(db) = db else {
        eprintln!("SKIP-TEST-CLUSTER: filters_return_each_matching_recipe_once skipped");
        return;
    };
    let owner = db.seed_user("cook@example.com");
    let repos = Repos::new(&db);

    db.runtime.block_on(async {
        let spicy = repos.label(&owner, LabelKind::Tag, "Spicy").await;
        let dinner = repos.label(&owner, LabelKind::Tag, "Dinner").await;
        let rice = repos.label(&owner, LabelKind::Ingredient, "Rice").await;
        let oats = repos.label(&owner, LabelKind::Ingredient, "Oats").await;
        let curry = repos
            .recipes
            .insert(&owner, &draft("Curry"), &labels(&[&spicy, &dinner], &[&rice]))
            .await
            .expect("insert");
        let chili = repos
            .recipes
            .insert(&owner, &draft("Chili"), &labels(&[&spicy], &[]))
            .await
            .expect("insert");
        repos
            .recipes
            .insert(&owner, &draft("Porridge"), &labels(&[], &[&oats]))
            .await
            .expect("insert");

        let by_tags = RecipeFilter {
            tag_ids: Some(vec![spicy.id, dinner.id]),
            ingredient_ids: None,
        };
        let listed = repos.recipes.list(&owner, &by_tags).await.expect("list");
        let ids: Vec<RecipeId> = listed.iter().map(|recipe| recipe.id).collect();
        assert_eq!(ids, vec![chili, curry]);

        let both = RecipeFilter {
            tag_ids: Some(vec![spicy.id]),
            ingredient_ids: Some(vec![rice.id]),
        };
        let listed = repos.recipes.list(&owner, &both).await.expect("list");
        let ids: Vec<RecipeId> = listed.iter().map(|recipe| recipe.id).collect();
        assert_eq!(ids, vec![curry]);

        let wrong_kind = RecipeFilter {
            tag_ids: Some(vec![rice.id]),
            ingredient_ids: None,
        };
        assert!(repos.recipes.list(&owner, &wrong_kind).await.expect("list").is_empty());
    });
}

#[rstest]
fn failed_link_insert_rolls_back_the_recipe(db: Option<DbContext>) {
    let Some(db) = db else {
        eprintln!("SKIP-TEST-CLUSTER: failed_link_insert_rolls_back_the_recipe skipped");
        return;
    };
    let owner = db.seed_user("cook@example.com");
    let repos = Repos::new(&db);

    db.runtime.block_on(async {
        let dangling = LabelAssignment {
            tags: Some(vec![LabelId::new(i64::MAX)]),
            ingredients: None,
        };
        repos
            .recipes
            .insert(&owner, &draft("Ghost"), &dangling)
            .await
            .expect_err("foreign key violation");

        let listed = repos
            .recipes
            .list(&owner, &RecipeFilter::default())
            .await
            .expect("list");
        assert!(listed.is_empty());
    });
}

#[rstest]
fn deleting_a_recipe_keeps_its_labels(db: Option<DbContext>) {
    let Some(db) = db else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_recipe_keeps_its_labels skipped");
        return;
    };
    let owner = db.seed_user("cook@example.com");
    let repos = Repos::new(&db);

    db.runtime.block_on(async {
        let vegan = repos.label(&owner, LabelKind::Tag, "Vegan").await;
        let id = repos
            .recipes
            .insert(&owner, &draft("Salad"), &labels(&[&vegan], &[]))
            .await
            .expect("insert");

        assert!(repos.recipes.delete(&owner, id).await.expect("delete"));
        assert!(repos.recipes.find(&owner, id).await.expect("find").is_none());

        let remaining = repos
            .labels
            .list(&owner, LabelKind::Tag, false)
            .await
            .expect("list");
        assert_eq!(remaining, vec![vegan]);
    });
}

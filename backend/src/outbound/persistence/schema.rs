//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//! Regenerate with `diesel print-schema` after changing `migrations/`.

diesel::table! {
    /// User accounts keyed by UUID and looked up at login by email.
    users (id) {
        id -> Uuid,
        /// Normalised email; unique.
        email -> Varchar,
        name -> Varchar,
        /// PHC-formatted Argon2 hash.
        password_hash -> Text,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipes owned by a single user.
    recipes (id) {
        id -> Int8,
        user_id -> Uuid,
        title -> Varchar,
        time_minutes -> Int4,
        /// `NUMERIC(5, 2)`.
        price -> Numeric,
        description -> Text,
        link -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tags and ingredients, told apart by `kind`.
    labels (id) {
        id -> Int8,
        user_id -> Uuid,
        /// Either `tag` or `ingredient`.
        kind -> Varchar,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Many-to-many link between recipes and labels.
    recipe_labels (recipe_id, label_id) {
        recipe_id -> Int8,
        label_id -> Int8,
    }
}

diesel::joinable!(recipes -> users (user_id));
diesel::joinable!(labels -> users (user_id));
diesel::joinable!(recipe_labels -> recipes (recipe_id));
diesel::joinable!(recipe_labels -> labels (label_id));

diesel::allow_tables_to_appear_in_same_query!(users, recipes, labels, recipe_labels);

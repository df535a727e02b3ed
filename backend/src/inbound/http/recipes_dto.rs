//! Recipe DTOs and parsing helpers.
//!
//! Request bodies are camelCase and also accept the snake_case spelling of
//! multi-word fields. Unknown keys (for example an attempted `user` owner
//! override) are ignored.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateRecipeRequest, UpdateRecipeRequest};
use crate::domain::{
    Error, Label, LabelId, LabelName, LabelNames, Price, Recipe, RecipeChanges, RecipeDraft,
    RecipeFilter, RecipeId, RecipeLink, RecipeTitle, TimeMinutes,
};
use crate::inbound::http::validation::{
    FieldName, label_name_error, missing_field_error, parse_id_list, recipe_field_error,
};

const TITLE: FieldName = FieldName::new("title");
const TIME_MINUTES: FieldName = FieldName::new("timeMinutes");
const PRICE: FieldName = FieldName::new("price");
const LINK: FieldName = FieldName::new("link");
const TAGS: FieldName = FieldName::new("tags");
const INGREDIENTS: FieldName = FieldName::new("ingredients");

#[derive(Debug, Deserialize)]
pub(super) struct RecipePath {
    pub(super) id: String,
}

/// Query parameters accepted by `GET /api/v1/recipes`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeListQuery {
    /// Comma-separated tag ids; recipes carrying any of them match.
    #[param(example = "1,2")]
    pub tags: Option<String>,
    /// Comma-separated ingredient ids; recipes carrying any of them match.
    #[param(example = "3")]
    pub ingredients: Option<String>,
}

/// A tag or ingredient referenced by name inside a recipe payload.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LabelPayload {
    #[schema(example = "Vegan")]
    pub name: String,
}

/// Price as sent by clients: either `"5.50"` or `5.5`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

impl PriceInput {
    fn parse(&self) -> Result<Price, Error> {
        let parsed = match self {
            Self::Text(raw) => Price::parse(raw),
            Self::Number(number) => Price::parse(&number.to_string()),
        };
        parsed.map_err(|err| recipe_field_error(PRICE, &err))
    }
}

/// Request body shared by create, replace and partial update.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[schema(example = "Thai prawn curry")]
    pub title: Option<String>,
    #[serde(alias = "time_minutes")]
    #[schema(example = 30)]
    pub time_minutes: Option<i32>,
    #[schema(value_type = Option<String>, example = "5.50")]
    pub price: Option<PriceInput>,
    pub description: Option<String>,
    #[schema(example = "https://example.com/curry")]
    pub link: Option<String>,
    pub tags: Option<Vec<LabelPayload>>,
    pub ingredients: Option<Vec<LabelPayload>>,
}

/// A tag or ingredient as rendered inside recipes and label lists.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LabelResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Vegan")]
    pub name: String,
}

impl From<Label> for LabelResponse {
    fn from(label: Label) -> Self {
        Self {
            id: label.id.get(),
            name: label.name.as_ref().to_owned(),
        }
    }
}

/// Recipe as rendered in list responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummaryResponse {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    #[schema(example = "5.50")]
    pub price: String,
    pub link: String,
    pub tags: Vec<LabelResponse>,
    pub ingredients: Vec<LabelResponse>,
}

/// Recipe as rendered by detail, create and update responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetailResponse {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    #[schema(example = "5.50")]
    pub price: String,
    pub description: String,
    pub link: String,
    pub tags: Vec<LabelResponse>,
    pub ingredients: Vec<LabelResponse>,
}

fn render_labels(labels: Vec<Label>) -> Vec<LabelResponse> {
    labels.into_iter().map(LabelResponse::from).collect()
}

impl From<Recipe> for RecipeSummaryResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.get(),
            title: recipe.title.as_ref().to_owned(),
            time_minutes: recipe.time_minutes.get(),
            price: recipe.price.to_string(),
            link: recipe.link.as_ref().to_owned(),
            tags: render_labels(recipe.tags),
            ingredients: render_labels(recipe.ingredients),
        }
    }
}

impl From<Recipe> for RecipeDetailResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.get(),
            title: recipe.title.as_ref().to_owned(),
            time_minutes: recipe.time_minutes.get(),
            price: recipe.price.to_string(),
            description: recipe.description,
            link: recipe.link.as_ref().to_owned(),
            tags: render_labels(recipe.tags),
            ingredients: render_labels(recipe.ingredients),
        }
    }
}

/// Parse a recipe id from the path. Anything that is not an integer cannot
/// name a recipe, so it is reported as not found.
pub(super) fn parse_recipe_id(path: RecipePath) -> Result<RecipeId, Error> {
    path.id
        .parse::<i64>()
        .map(RecipeId::new)
        .map_err(|_| Error::not_found(format!("recipe {} not found", path.id)))
}

pub(super) fn parse_list_query(query: RecipeListQuery) -> Result<RecipeFilter, Error> {
    // `?tags=` with no ids leaves that filter off.
    let to_ids = |raw: Option<String>, field: FieldName| -> Result<Option<Vec<LabelId>>, Error> {
        let ids = match raw {
            Some(raw) => parse_id_list(&raw, field)?,
            None => return Ok(None),
        };
        if ids.is_empty() {
            return Ok(None);
        }
        Ok(Some(ids.into_iter().map(LabelId::new).collect()))
    };
    Ok(RecipeFilter {
        tag_ids: to_ids(query.tags, TAGS)?,
        ingredient_ids: to_ids(query.ingredients, INGREDIENTS)?,
    })
}

fn parse_label_list(
    items: Option<Vec<LabelPayload>>,
    field: FieldName,
) -> Result<Option<Vec<LabelName>>, Error> {
    items
        .map(|items| {
            items
                .into_iter()
                .map(|item| LabelName::new(&item.name).map_err(|err| label_name_error(field, &err)))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
}

fn parse_label_names(
    tags: Option<Vec<LabelPayload>>,
    ingredients: Option<Vec<LabelPayload>>,
) -> Result<LabelNames, Error> {
    Ok(LabelNames {
        tags: parse_label_list(tags, TAGS)?,
        ingredients: parse_label_list(ingredients, INGREDIENTS)?,
    })
}

fn parse_changes(
    title: Option<String>,
    time_minutes: Option<i32>,
    price: Option<&PriceInput>,
    description: Option<String>,
    link: Option<String>,
) -> Result<RecipeChanges, Error> {
    Ok(RecipeChanges {
        title: title
            .map(|raw| RecipeTitle::new(raw).map_err(|err| recipe_field_error(TITLE, &err)))
            .transpose()?,
        time_minutes: time_minutes
            .map(|raw| TimeMinutes::new(raw).map_err(|err| recipe_field_error(TIME_MINUTES, &err)))
            .transpose()?,
        price: price.map(PriceInput::parse).transpose()?,
        description,
        link: link
            .map(|raw| RecipeLink::new(raw).map_err(|err| recipe_field_error(LINK, &err)))
            .transpose()?,
    })
}

/// Validate a create payload. `title`, `timeMinutes` and `price` are required;
/// absent label lists mean "no labels".
pub(super) fn parse_create_request(payload: RecipeRequest) -> Result<CreateRecipeRequest, Error> {
    let RecipeRequest {
        title,
        time_minutes,
        price,
        description,
        link,
        tags,
        ingredients,
    } = payload;
    let title = title.ok_or_else(|| missing_field_error(TITLE))?;
    let time_minutes = time_minutes.ok_or_else(|| missing_field_error(TIME_MINUTES))?;
    let price = price.ok_or_else(|| missing_field_error(PRICE))?;

    let draft = RecipeDraft {
        title: RecipeTitle::new(title).map_err(|err| recipe_field_error(TITLE, &err))?,
        time_minutes: TimeMinutes::new(time_minutes)
            .map_err(|err| recipe_field_error(TIME_MINUTES, &err))?,
        price: price.parse()?,
        description: description.unwrap_or_default(),
        link: link
            .map(|raw| RecipeLink::new(raw).map_err(|err| recipe_field_error(LINK, &err)))
            .transpose()?
            .unwrap_or_default(),
    };
    Ok(CreateRecipeRequest {
        draft,
        labels: parse_label_names(tags, ingredients)?,
    })
}

/// Validate a full replacement (`PUT`). The required fields match create;
/// optional fields that are left out keep their stored values.
pub(super) fn parse_replace_request(payload: RecipeRequest) -> Result<UpdateRecipeRequest, Error> {
    if payload.title.is_none() {
        return Err(missing_field_error(TITLE));
    }
    if payload.time_minutes.is_none() {
        return Err(missing_field_error(TIME_MINUTES));
    }
    if payload.price.is_none() {
        return Err(missing_field_error(PRICE));
    }
    parse_patch_request(payload)
}

/// Validate a partial update (`PATCH`). Only supplied fields change.
pub(super) fn parse_patch_request(payload: RecipeRequest) -> Result<UpdateRecipeRequest, Error> {
    let RecipeRequest {
        title,
        time_minutes,
        price,
        description,
        link,
        tags,
        ingredients,
    } = payload;
    Ok(UpdateRecipeRequest {
        changes: parse_changes(title, time_minutes, price.as_ref(), description, link)?,
        labels: parse_label_names(tags, ingredients)?,
    })
}

//! Recipe aggregate and its validated fields.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::num_bigint::Sign;

use super::{Label, LabelId, LabelName};

/// Maximum length of a recipe title or link.
pub const RECIPE_FIELD_MAX: usize = 255;
/// Number of decimal places stored for a price.
pub const PRICE_SCALE: i64 = 2;
/// Exclusive upper bound for prices, matching `NUMERIC(5, 2)`.
const PRICE_LIMIT: i64 = 1000;
/// Whole digits allowed before the decimal point.
const PRICE_LIMIT_DIGITS: i64 = 3;
/// Longest price text worth handing to the decimal parser.
const PRICE_INPUT_MAX: usize = 32;

/// Validation errors raised by recipe field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    NegativeTime,
    InvalidPrice,
    NegativePrice,
    PriceTooPrecise { max_places: i64 },
    PriceTooLarge,
    LinkTooLong { max: usize },
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::NegativeTime => write!(f, "timeMinutes must not be negative"),
            Self::InvalidPrice => write!(f, "price must be a decimal number"),
            Self::NegativePrice => write!(f, "price must not be negative"),
            Self::PriceTooPrecise { max_places } => {
                write!(f, "price must have at most {max_places} decimal places")
            }
            Self::PriceTooLarge => write!(f, "price must be less than {PRICE_LIMIT}"),
            Self::LinkTooLong { max } => write!(f, "link must be at most {max} characters"),
        }
    }
}

impl std::error::Error for RecipeValidationError {}

/// Database identifier of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(i64);

impl RecipeId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier for adapters.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty recipe title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTitle(String);

impl RecipeTitle {
    /// Validate and trim a raw title.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > RECIPE_FIELD_MAX {
            return Err(RecipeValidationError::TitleTooLong {
                max: RECIPE_FIELD_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecipeTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Preparation time in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeMinutes(i32);

impl TimeMinutes {
    /// Validate a non-negative minute count.
    pub fn new(raw: i32) -> Result<Self, RecipeValidationError> {
        if raw < 0 {
            return Err(RecipeValidationError::NegativeTime);
        }
        Ok(Self(raw))
    }

    /// Raw minute count.
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Non-negative price with at most three whole digits and two decimals.
///
/// Always carries a scale of two so it renders as, for example, `5.50`.
///
/// # Examples
/// ```
/// use recipe_backend::domain::Price;
///
/// let price = Price::parse("5.5").unwrap();
/// assert_eq!(price.to_string(), "5.50");
/// assert!(Price::parse("1000").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price(BigDecimal);

impl Price {
    /// Validate a decimal amount.
    ///
    /// The exponent is checked on the normalized value before any rescaling,
    /// so values such as `1e-300000000` are rejected without expanding them.
    pub fn new(value: BigDecimal) -> Result<Self, RecipeValidationError> {
        if value.sign() == Sign::Minus {
            return Err(RecipeValidationError::NegativePrice);
        }
        let (_, scale) = value.normalized().as_bigint_and_exponent();
        if scale > PRICE_SCALE {
            return Err(RecipeValidationError::PriceTooPrecise {
                max_places: PRICE_SCALE,
            });
        }
        if scale < -PRICE_LIMIT_DIGITS {
            return Err(RecipeValidationError::PriceTooLarge);
        }
        let scaled = value.with_scale(PRICE_SCALE);
        if scaled >= BigDecimal::from(PRICE_LIMIT) {
            return Err(RecipeValidationError::PriceTooLarge);
        }
        Ok(Self(scaled))
    }

    /// Parse and validate a decimal string such as `"5.50"`.
    pub fn parse(raw: &str) -> Result<Self, RecipeValidationError> {
        let raw = raw.trim();
        if raw.len() > PRICE_INPUT_MAX {
            return Err(RecipeValidationError::InvalidPrice);
        }
        let value = BigDecimal::from_str(raw).map_err(|_| RecipeValidationError::InvalidPrice)?;
        Self::new(value)
    }

    /// Decimal value for adapters.
    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional external link. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeLink(String);

impl RecipeLink {
    /// Validate and trim a raw link.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() > RECIPE_FIELD_MAX {
            return Err(RecipeValidationError::LinkTooLong {
                max: RECIPE_FIELD_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecipeLink {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Scalar recipe fields required on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: RecipeTitle,
    pub time_minutes: TimeMinutes,
    pub price: Price,
    pub description: String,
    pub link: RecipeLink,
}

/// Scalar fields changed by an update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeChanges {
    pub title: Option<RecipeTitle>,
    pub time_minutes: Option<TimeMinutes>,
    pub price: Option<Price>,
    pub description: Option<String>,
    pub link: Option<RecipeLink>,
}

impl RecipeChanges {
    /// Whether the update touches no scalar field.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.time_minutes.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.link.is_none()
    }
}

/// Tag and ingredient names supplied with a create or update.
///
/// `None` means the key was absent and associations of that kind stay as
/// they are; `Some(vec![])` clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelNames {
    pub tags: Option<Vec<LabelName>>,
    pub ingredients: Option<Vec<LabelName>>,
}

/// Resolved label ids to associate with a recipe, following the same
/// absent-versus-empty rule as [`LabelNames`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelAssignment {
    pub tags: Option<Vec<LabelId>>,
    pub ingredients: Option<Vec<LabelId>>,
}

/// Filter for the recipe list. Each present filter matches recipes holding
/// at least one of the listed labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub tag_ids: Option<Vec<LabelId>>,
    pub ingredient_ids: Option<Vec<LabelId>>,
}

/// A recipe with its tags and ingredients, as seen by its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: RecipeTitle,
    pub time_minutes: TimeMinutes,
    pub price: Price,
    pub description: String,
    pub link: RecipeLink,
    pub tags: Vec<Label>,
    pub ingredients: Vec<Label>,
}

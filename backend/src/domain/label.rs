//! Tags and ingredients.
//!
//! Both are short names owned by a single user and attached to recipes
//! many-to-many. They share one model, [`Label`], distinguished by
//! [`LabelKind`].

use std::fmt;
use std::str::FromStr;

/// Maximum length of a label name.
pub const LABEL_NAME_MAX: usize = 255;

/// Database identifier of a tag or ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(i64);

impl LabelId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier for adapters.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which collection a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Tag,
    Ingredient,
}

impl LabelKind {
    /// Stable storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Ingredient => "ingredient",
        }
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown label kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label kind: {0}")]
pub struct UnknownLabelKind(pub String);

impl FromStr for LabelKind {
    type Err = UnknownLabelKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tag" => Ok(Self::Tag),
            "ingredient" => Ok(Self::Ingredient),
            other => Err(UnknownLabelKind(other.to_owned())),
        }
    }
}

/// Validation errors for label names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelValidationError {
    EmptyName,
    NameTooLong { max: usize },
}

impl fmt::Display for LabelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for LabelValidationError {}

/// Trimmed, non-empty label name. Comparison is exact and case-sensitive.
///
/// # Examples
/// ```
/// use recipe_backend::domain::LabelName;
///
/// let name = LabelName::new("  Vegan ").unwrap();
/// assert_eq!(name.as_ref(), "Vegan");
/// assert_ne!(name, LabelName::new("vegan").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelName(String);

impl LabelName {
    /// Validate and trim a raw name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LabelValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(LabelValidationError::EmptyName);
        }
        if trimmed.chars().count() > LABEL_NAME_MAX {
            return Err(LabelValidationError::NameTooLong {
                max: LABEL_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for LabelName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// A tag or ingredient row as seen by its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub id: LabelId,
    pub kind: LabelKind,
    pub name: LabelName,
}

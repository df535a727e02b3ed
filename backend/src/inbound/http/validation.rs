//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every field-level failure becomes `400 invalid_request` with
//! `details = {"field": .., "code": ..}` so clients can attach messages to
//! form inputs.

use serde_json::json;

use crate::domain::{
    Error, LabelValidationError, PasswordValidationError, RecipeValidationError,
    UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyEmail,
    InvalidEmail,
    Blank,
    TooLong,
    TooShort,
    Negative,
    InvalidDecimal,
    TooPrecise,
    OutOfRange,
    InvalidId,
    InvalidFlag,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::Blank => "blank",
            Self::TooLong => "too_long",
            Self::TooShort => "too_short",
            Self::Negative => "negative",
            Self::InvalidDecimal => "invalid_decimal",
            Self::TooPrecise => "too_precise",
            Self::OutOfRange => "out_of_range",
            Self::InvalidId => "invalid_id",
            Self::InvalidFlag => "invalid_flag",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

pub(crate) fn user_field_error(field: FieldName, err: &UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyEmail => ErrorCode::EmptyEmail,
        UserValidationError::EmailTooLong { .. } | UserValidationError::NameTooLong { .. } => {
            ErrorCode::TooLong
        }
        UserValidationError::InvalidEmail
        | UserValidationError::EmptyId
        | UserValidationError::InvalidId => ErrorCode::InvalidEmail,
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn password_error(err: &PasswordValidationError) -> Error {
    match err {
        PasswordValidationError::TooShort { .. } => {
            field_error(PASSWORD, ErrorCode::TooShort, err.to_string())
        }
    }
}

pub(crate) fn recipe_field_error(field: FieldName, err: &RecipeValidationError) -> Error {
    let code = match err {
        RecipeValidationError::EmptyTitle => ErrorCode::Blank,
        RecipeValidationError::TitleTooLong { .. } | RecipeValidationError::LinkTooLong { .. } => {
            ErrorCode::TooLong
        }
        RecipeValidationError::NegativeTime | RecipeValidationError::NegativePrice => {
            ErrorCode::Negative
        }
        RecipeValidationError::InvalidPrice => ErrorCode::InvalidDecimal,
        RecipeValidationError::PriceTooPrecise { .. } => ErrorCode::TooPrecise,
        RecipeValidationError::PriceTooLarge => ErrorCode::OutOfRange,
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn label_name_error(field: FieldName, err: &LabelValidationError) -> Error {
    let code = match err {
        LabelValidationError::EmptyName => ErrorCode::Blank,
        LabelValidationError::NameTooLong { .. } => ErrorCode::TooLong,
    };
    field_error(field, code, err.to_string())
}

/// Parse a comma-separated list of numeric ids such as `1,2,3`.
///
/// Empty segments are skipped so `1,,2` and a trailing comma are tolerated.
pub(crate) fn parse_id_list(raw: &str, field: FieldName) -> Result<Vec<i64>, Error> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment.parse::<i64>().map_err(|_| {
                let name = field.as_str();
                Error::invalid_request(format!("{name} must be a comma-separated list of ids"))
                    .with_details(json!({
                        "field": name,
                        "value": segment,
                        "code": ErrorCode::InvalidId.as_str(),
                    }))
            })
        })
        .collect()
}

/// Parse an optional boolean query flag accepting `1`/`0`/`true`/`false`.
pub(crate) fn parse_flag(raw: Option<&str>, field: FieldName) -> Result<bool, Error> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        _ => {
            let name = field.as_str();
            Err(
                Error::invalid_request(format!("{name} must be 0, 1, true or false")).with_details(
                    json!({
                        "field": name,
                        "value": raw,
                        "code": ErrorCode::InvalidFlag.as_str(),
                    }),
                ),
            )
        }
    }
}

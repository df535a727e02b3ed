//! Authentication primitives such as login credentials and passwords.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{EmailAddress, UserName, UserValidationError};

/// Minimum number of characters accepted for a new password.
pub const PASSWORD_MIN_LEN: usize = 5;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email could not be parsed as an address.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised exactly as at registration so lookups match.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use recipe_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Cook@Example.com", "secret").unwrap();
/// assert_eq!(creds.email().as_ref(), "Cook@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|err| match err {
            UserValidationError::EmptyEmail => LoginValidationError::EmptyEmail,
            _ => LoginValidationError::InvalidEmail,
        })?;

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Error raised when a new password does not meet the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    TooShort { min: usize },
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "password must be at least {min} characters"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

/// Plain-text password accepted for a new or changed account.
///
/// The buffer is zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a new password against the length policy.
    pub fn new(raw: &str) -> Result<Self, PasswordValidationError> {
        if raw.chars().count() < PASSWORD_MIN_LEN {
            return Err(PasswordValidationError::TooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Borrow the secret for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Validated input for creating an account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: EmailAddress,
    pub name: UserName,
    pub password: Password,
}

/// Validated partial update of the caller's own account.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<EmailAddress>,
    pub name: Option<UserName>,
    pub password: Option<Password>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("not-an-email", "pw", LoginValidationError::InvalidEmail)]
    #[case("cook@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  cook@EXAMPLE.com  ", "secret", "cook@example.com")]
    #[case("Chef@Example.org", "correct horse battery staple", "Chef@example.org")]
    fn valid_credentials_normalise_email(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected_email: &str,
    ) {
        let creds = LoginCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), expected_email);
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("pw")]
    #[case("1234")]
    fn short_passwords_are_rejected(#[case] raw: &str) {
        let err = Password::new(raw).expect_err("too short");
        assert_eq!(
            err,
            PasswordValidationError::TooShort {
                min: PASSWORD_MIN_LEN
            }
        );
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter22").expect("valid password");
        assert_eq!(password.expose(), "hunter22");
        assert_eq!(format!("{password:?}"), "Password(..)");
    }
}

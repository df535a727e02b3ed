//! User account model.
//!
//! Accounts are keyed by UUID and identified at login by a normalised email
//! address. Password hashes never live on [`User`]; they travel separately in
//! [`UserCredentials`] so that profile reads cannot leak them.

use std::fmt;

use uuid::Uuid;

use super::password::PasswordHash;

/// Maximum length for email addresses and display names.
pub const USER_FIELD_MAX: usize = 255;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyEmail,
    InvalidEmail,
    EmailTooLong { max: usize },
    NameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id.to_owned()))
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Normalised email address used as the login identifier.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed; the remainder is non-empty.
/// - Contains an `@` with a non-empty local part and domain, and no
///   whitespace.
/// - The domain part is lowercased; the local part keeps its casing.
///
/// # Examples
/// ```
/// use recipe_backend::domain::EmailAddress;
///
/// let email = EmailAddress::new("Test2@Example.com").unwrap();
/// assert_eq!(email.as_ref(), "Test2@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise a raw email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > USER_FIELD_MAX {
            return Err(UserValidationError::EmailTooLong {
                max: USER_FIELD_MAX,
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }

        let (local, domain) = trimmed
            .rsplit_once('@')
            .ok_or(UserValidationError::InvalidEmail)?;
        if local.is_empty() || domain.is_empty() {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Free-form account name. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate a display name, enforcing only the length limit.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.chars().count() > USER_FIELD_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_FIELD_MAX,
            });
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Role flags attached to an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserRoles {
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl UserRoles {
    /// Roles granted to accounts created through the command line.
    pub const fn superuser() -> Self {
        Self {
            is_staff: true,
            is_superuser: true,
        }
    }
}

/// Application user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    name: UserName,
    is_active: bool,
    roles: UserRoles,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(
        id: UserId,
        email: EmailAddress,
        name: UserName,
        is_active: bool,
        roles: UserRoles,
    ) -> Self {
        Self {
            id,
            email,
            name,
            is_active,
            roles,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Normalised login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Account name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Whether the account may authenticate.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether the account has staff access.
    pub fn is_staff(&self) -> bool {
        self.roles.is_staff
    }

    /// Whether the account holds every permission.
    pub fn is_superuser(&self) -> bool {
        self.roles.is_superuser
    }
}

/// A stored user together with its password hash, used only for login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: PasswordHash,
}

/// Values required to insert a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub name: UserName,
    pub password_hash: PasswordHash,
    pub roles: UserRoles,
}

/// Partial update applied to an existing account. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<EmailAddress>,
    pub name: Option<UserName>,
    pub password_hash: Option<PasswordHash>,
}

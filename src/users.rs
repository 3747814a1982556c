//! Users

use std::{fmt, str::FromStr};

use crate::{errors::DomainError, uuids::TypedUuid};

/// Marker for user ids.
#[derive(Debug)]
pub struct UserMarker;

/// User identifier.
pub type UserUuid = TypedUuid<UserMarker>;

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Shopper.
    #[default]
    Customer,

    /// Catalogue administrator.
    Admin,
}

impl Role {
    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::validation(format!("Unknown role: {other}"))),
        }
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserUuid,
    pub email: String,
    pub name: String,
    pub hashed_password: String,
    pub role: Role,
}

impl User {
    /// Whether this user may administer the catalogue.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

//! Domain Errors

use thiserror::Error;

/// Category of a [`DomainError`], used at the transport boundary to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    /// A referenced entity does not exist.
    NotFound,

    /// The caller could not be identified.
    Authentication,

    /// The caller is identified but not allowed to act.
    Authorization,

    /// Input failed a business rule.
    Validation,

    /// Any other business-rule failure.
    Domain,
}

impl DomainErrorKind {
    /// Message used when an error of this kind is raised without one.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::NotFound => "Resource not found",
            Self::Authentication => "Authentication failed",
            Self::Authorization => "Not authorized",
            Self::Validation => "Validation error",
            Self::Domain => "Domain error",
        }
    }
}

/// Typed business-rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The caller could not be identified.
    #[error("{0}")]
    Authentication(String),

    /// The caller is identified but not allowed to act.
    #[error("{0}")]
    Authorization(String),

    /// Input failed a business rule.
    #[error("{0}")]
    Validation(String),

    /// Any other business-rule failure.
    #[error("{0}")]
    Domain(String),
}

impl DomainError {
    /// Not found error with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Authentication error with the given message.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Authorization error with the given message.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    /// Validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The category of this error.
    #[must_use]
    pub const fn kind(&self) -> DomainErrorKind {
        match self {
            Self::NotFound(_) => DomainErrorKind::NotFound,
            Self::Authentication(_) => DomainErrorKind::Authentication,
            Self::Authorization(_) => DomainErrorKind::Authorization,
            Self::Validation(_) => DomainErrorKind::Validation,
            Self::Domain(_) => DomainErrorKind::Domain,
        }
    }

    /// The human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(message)
            | Self::Authentication(message)
            | Self::Authorization(message)
            | Self::Validation(message)
            | Self::Domain(message) => message,
        }
    }
}

impl From<DomainErrorKind> for DomainError {
    fn from(kind: DomainErrorKind) -> Self {
        let message = kind.default_message().to_string();

        match kind {
            DomainErrorKind::NotFound => Self::NotFound(message),
            DomainErrorKind::Authentication => Self::Authentication(message),
            DomainErrorKind::Authorization => Self::Authorization(message),
            DomainErrorKind::Validation => Self::Validation(message),
            DomainErrorKind::Domain => Self::Domain(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            DomainError::not_found("x").kind(),
            DomainErrorKind::NotFound
        );
        assert_eq!(
            DomainError::authorization("x").kind(),
            DomainErrorKind::Authorization
        );
        assert_eq!(
            DomainError::Domain("x".to_string()).kind(),
            DomainErrorKind::Domain
        );
    }

    #[test]
    fn display_is_the_message() {
        let error = DomainError::validation("Quantity cannot be negative");

        assert_eq!(error.to_string(), "Quantity cannot be negative");
        assert_eq!(error.message(), "Quantity cannot be negative");
    }

    #[test]
    fn kinds_carry_default_messages() {
        let error = DomainError::from(DomainErrorKind::Authentication);

        assert_eq!(error.message(), "Authentication failed");
        assert_eq!(
            DomainError::from(DomainErrorKind::NotFound).message(),
            "Resource not found"
        );
    }
}

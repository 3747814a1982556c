//! Use case errors.

use storefront::DomainError;
use thiserror::Error;

use crate::{
    auth::{PasswordHashError, TokenError},
    repositories::RepositoryError,
};

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("repository error")]
    Repository(#[from] RepositoryError),

    #[error("password hashing error")]
    Password(#[from] PasswordHashError),

    #[error("token error")]
    Token(#[source] TokenError),
}

impl From<TokenError> for UseCaseError {
    /// Rejected tokens are the caller's fault; failing to sign one is ours.
    fn from(error: TokenError) -> Self {
        if matches!(error, TokenError::Encode(_)) {
            return Self::Token(error);
        }

        Self::Domain(DomainError::authentication("Invalid token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_tokens_become_authentication_errors() {
        let error = UseCaseError::from(TokenError::Subject);

        assert!(
            matches!(error, UseCaseError::Domain(DomainError::Authentication(ref message)) if message == "Invalid token"),
            "expected Authentication, got {error:?}"
        );
    }
}

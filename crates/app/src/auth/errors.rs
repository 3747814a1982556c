//! Authentication errors.

use argon2::password_hash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("failed to hash password: {0}")]
    Hash(password_hash::Error),

    #[error("invalid password hashing parameters: {0}")]
    Params(argon2::Error),
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token is invalid or expired")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("expected a {expected} token")]
    WrongKind { expected: &'static str },

    #[error("token subject is not a user id")]
    Subject,
}

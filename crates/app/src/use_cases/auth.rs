//! Registration, login and session refresh.

use storefront::{
    DomainError,
    users::{Role, User, UserUuid},
};
use tracing::info;

use crate::{
    auth::{PasswordHasher, TokenGenerator, TokenKind},
    repositories::{RepositoryError, UserRepository},
    use_cases::UseCaseError,
};

const EMAIL_TAKEN: &str = "Email already registered";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Verified against when the email is unknown, so both login failures cost one hash.
const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$sbe1aBI3ZYCMMlXItK9tkw$fUm2vTWJiPn/xg0Lflc8A61GwL/pV0nCDOUhFzym+2A";

/// Token scheme reported alongside every access token.
pub const TOKEN_TYPE: &str = "bearer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUserInput {
    pub email: String,
    pub password: String,
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub access_token: String,
    pub token_type: &'static str,
    pub user_id: UserUuid,
    pub name: String,
}

/// Tokens issued by a session refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedSession {
    pub user_id: UserUuid,
    pub access_token: String,
    pub refresh_token: String,
}

pub struct RegisterUser<'a> {
    users: &'a dyn UserRepository,
    passwords: &'a dyn PasswordHasher,
    tokens: &'a dyn TokenGenerator,
}

impl<'a> RegisterUser<'a> {
    #[must_use]
    pub fn new(
        users: &'a dyn UserRepository,
        passwords: &'a dyn PasswordHasher,
        tokens: &'a dyn TokenGenerator,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Create a customer account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the email is malformed or already registered.
    pub async fn execute(&self, input: RegisterUserInput) -> Result<AuthResult, UseCaseError> {
        validate_email(&input.email)?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(DomainError::validation(EMAIL_TAKEN).into());
        }

        let user = User {
            id: UserUuid::new(),
            email: input.email,
            name: input.name,
            hashed_password: self.passwords.hash(&input.password)?,
            role: Role::Customer,
        };

        let user = self.users.save(&user).await.map_err(|error| match error {
            RepositoryError::AlreadyExists => DomainError::validation(EMAIL_TAKEN).into(),
            other => UseCaseError::from(other),
        })?;

        info!(user = %user.id, "user registered");

        Ok(AuthResult {
            access_token: self.tokens.generate(user.id)?,
            token_type: TOKEN_TYPE,
            user_id: user.id,
            name: user.name,
        })
    }
}

pub struct LoginUser<'a> {
    users: &'a dyn UserRepository,
    passwords: &'a dyn PasswordHasher,
    tokens: &'a dyn TokenGenerator,
}

impl<'a> LoginUser<'a> {
    #[must_use]
    pub fn new(
        users: &'a dyn UserRepository,
        passwords: &'a dyn PasswordHasher,
        tokens: &'a dyn TokenGenerator,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Check credentials and issue an access token.
    ///
    /// # Errors
    ///
    /// Returns the same authentication error for an unknown email and a wrong password.
    pub async fn execute(&self, input: LoginUserInput) -> Result<AuthResult, UseCaseError> {
        let user = match self.users.find_by_email(&input.email).await? {
            Some(user) if self.passwords.verify(&input.password, &user.hashed_password) => user,
            Some(_) => return Err(DomainError::authentication(INVALID_CREDENTIALS).into()),
            None => {
                self.passwords.verify(&input.password, UNKNOWN_USER_HASH);

                return Err(DomainError::authentication(INVALID_CREDENTIALS).into());
            }
        };

        Ok(AuthResult {
            access_token: self.tokens.generate(user.id)?,
            token_type: TOKEN_TYPE,
            user_id: user.id,
            name: user.name,
        })
    }
}

pub struct RefreshSession<'a> {
    users: &'a dyn UserRepository,
    tokens: &'a dyn TokenGenerator,
}

impl<'a> RefreshSession<'a> {
    #[must_use]
    pub fn new(users: &'a dyn UserRepository, tokens: &'a dyn TokenGenerator) -> Self {
        Self { users, tokens }
    }

    /// Exchange a refresh token for a new access token and a rotated refresh token.
    ///
    /// Tokens are not tracked server side, so only the signature, expiry and the subject's
    /// continued existence are checked.
    ///
    /// # Errors
    ///
    /// Returns an authentication error when the token is missing, invalid, expired or not a
    /// refresh token, or when its user no longer exists.
    pub async fn execute(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<RefreshedSession, UseCaseError> {
        let refresh_token = refresh_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| DomainError::authentication("No refresh token provided"))?;

        let user_id = self.tokens.verify(refresh_token, TokenKind::Refresh)?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::authentication("User no longer exists").into());
        }

        Ok(RefreshedSession {
            user_id,
            access_token: self.tokens.generate(user_id)?,
            refresh_token: self.tokens.generate_refresh_token(user_id)?,
        })
    }
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.contains('@')
    });

    if valid {
        Ok(())
    } else {
        Err(DomainError::validation("Invalid email address"))
    }
}

//! Session tokens.
//!
//! HS256 JWTs carrying the user id as subject. Access and refresh tokens share a signing key and
//! are told apart by the `token_type` claim, so one can never stand in for the other.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockall::automock;
use serde::{Deserialize, Serialize};
use storefront::users::UserUuid;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::auth::TokenError;

/// Which of the two token classes a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
    jti: String,
    token_type: TokenKind,
}

#[automock]
pub trait TokenGenerator: Send + Sync {
    /// Issue a short-lived access token for `user`.
    fn generate(&self, user: UserUuid) -> Result<String, TokenError>;

    /// Issue a long-lived refresh token for `user`.
    fn generate_refresh_token(&self, user: UserUuid) -> Result<String, TokenError>;

    /// Check signature, expiry and class, returning the subject.
    fn verify(&self, token: &str, expected: TokenKind) -> Result<UserUuid, TokenError>;
}

/// Lifetimes and signing secret for [`JwtTokenGenerator`].
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub access_ttl: SignedDuration,
    pub refresh_ttl: SignedDuration,
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"**redacted**")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl Drop for TokenSettings {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

pub struct JwtTokenGenerator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: SignedDuration,
    refresh_ttl: SignedDuration,
}

impl JwtTokenGenerator {
    #[must_use]
    pub fn new(settings: &TokenSettings) -> Self {
        Self {
            encoding: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding: DecodingKey::from_secret(settings.secret.as_bytes()),
            access_ttl: settings.access_ttl,
            refresh_ttl: settings.refresh_ttl,
        }
    }

    fn issue(
        &self,
        user: UserUuid,
        kind: TokenKind,
        ttl: SignedDuration,
    ) -> Result<String, TokenError> {
        let now = Timestamp::now();

        let claims = Claims {
            sub: user.to_string(),
            iat: now.as_second(),
            exp: now.as_second().saturating_add(ttl.as_secs()),
            jti: Uuid::new_v4().to_string(),
            token_type: kind,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Encode)
    }
}

impl fmt::Debug for JwtTokenGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenGenerator")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenGenerator for JwtTokenGenerator {
    fn generate(&self, user: UserUuid) -> Result<String, TokenError> {
        self.issue(user, TokenKind::Access, self.access_ttl)
    }

    fn generate_refresh_token(&self, user: UserUuid) -> Result<String, TokenError> {
        self.issue(user, TokenKind::Refresh, self.refresh_ttl)
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<UserUuid, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(TokenError::Invalid)?
            .claims;

        if claims.token_type != expected {
            return Err(TokenError::WrongKind {
                expected: expected.as_str(),
            });
        }

        Uuid::try_parse(&claims.sub)
            .map(UserUuid::from_uuid)
            .map_err(|_malformed| TokenError::Subject)
    }
}

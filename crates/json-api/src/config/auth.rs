//! Auth Config

use clap::Args;
use jiff::SignedDuration;
use storefront_app::auth::TokenSettings;

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign access and refresh tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    #[arg(long, env = "ACCESS_TOKEN_EXPIRE_MINUTES", default_value_t = 30)]
    pub access_token_expire_minutes: i64,

    /// Refresh token lifetime in days
    #[arg(long, env = "REFRESH_TOKEN_EXPIRE_DAYS", default_value_t = 7)]
    pub refresh_token_expire_days: i64,

    /// Name of the refresh token cookie
    #[arg(long, env = "REFRESH_TOKEN_COOKIE_NAME", default_value = "refresh_token")]
    pub refresh_token_cookie_name: String,

    /// Only send the refresh token cookie over HTTPS
    #[arg(long, env = "REFRESH_TOKEN_COOKIE_SECURE", default_value_t = false)]
    pub refresh_token_cookie_secure: bool,
}

impl AuthConfig {
    /// Refresh token lifetime.
    #[must_use]
    pub fn refresh_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(self.refresh_token_expire_days.saturating_mul(24))
    }

    #[must_use]
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            secret: self.jwt_secret.clone(),
            access_ttl: SignedDuration::from_mins(self.access_token_expire_minutes),
            refresh_ttl: self.refresh_ttl(),
        }
    }
}

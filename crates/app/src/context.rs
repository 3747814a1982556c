//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    auth::{Argon2PasswordHasher, JwtTokenGenerator, PasswordHasher, TokenGenerator, TokenSettings},
    database,
    store::{PgStore, Store, UnitOfWork},
    use_cases::UseCaseError,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn Store>,
    pub passwords: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenGenerator>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Assemble a context from already-built parts.
    #[must_use]
    pub fn new(
        store: Arc<dyn Store>,
        passwords: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            store,
            passwords,
            tokens,
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        tokens: &TokenSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::new(
            Arc::new(PgStore::new(pool)),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(JwtTokenGenerator::new(tokens)),
        ))
    }

    /// Start a unit of work for one request.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot open a transaction.
    pub async fn begin(&self) -> Result<Box<dyn UnitOfWork>, UseCaseError> {
        Ok(self.store.begin().await?)
    }
}

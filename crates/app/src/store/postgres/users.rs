//! Users Repository

use async_trait::async_trait;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};
use storefront::users::{Role, User, UserUuid};

use crate::{
    repositories::{RepositoryError, UserRepository},
    store::postgres::{SharedTransaction, decode_error},
};

const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const FIND_USER_BY_ID_SQL: &str = include_str!("sql/find_user_by_id.sql");
const SAVE_USER_SQL: &str = include_str!("sql/save_user.sql");

#[derive(Debug, Clone)]
pub struct PgUserRepository {
    tx: SharedTransaction,
}

impl PgUserRepository {
    pub(crate) fn new(tx: SharedTransaction) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let mut guard = self.tx.lock().await;

        let row = query_as::<Postgres, UserRow>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(guard.connection()?)
            .await?;

        Ok(row.map(|UserRow(user)| user))
    }

    async fn find_by_id(&self, id: UserUuid) -> Result<Option<User>, RepositoryError> {
        let mut guard = self.tx.lock().await;

        let row = query_as::<Postgres, UserRow>(FIND_USER_BY_ID_SQL)
            .bind(id.into_uuid())
            .fetch_optional(guard.connection()?)
            .await?;

        Ok(row.map(|UserRow(user)| user))
    }

    async fn save(&self, user: &User) -> Result<User, RepositoryError> {
        let mut guard = self.tx.lock().await;

        let UserRow(saved) = query_as::<Postgres, UserRow>(SAVE_USER_SQL)
            .bind(user.id.into_uuid())
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.hashed_password)
            .bind(user.role.as_str())
            .fetch_one(guard.connection()?)
            .await?;

        Ok(saved)
    }
}

struct UserRow(User);

impl<'r> FromRow<'r, PgRow> for UserRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        Ok(Self(User {
            id: UserUuid::from_uuid(row.try_get("id")?),
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            hashed_password: row.try_get("hashed_password")?,
            role: role
                .parse::<Role>()
                .map_err(|source| decode_error("role", source))?,
        }))
    }
}

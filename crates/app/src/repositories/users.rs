//! User repository contract.

use async_trait::async_trait;
use mockall::automock;
use storefront::users::{User, UserUuid};

use super::RepositoryError;

#[automock]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look a user up by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Look a user up by id.
    async fn find_by_id(&self, id: UserUuid) -> Result<Option<User>, RepositoryError>;

    /// Insert or update a user.
    async fn save(&self, user: &User) -> Result<User, RepositoryError>;
}

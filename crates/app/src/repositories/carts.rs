//! Cart repository contract.

use async_trait::async_trait;
use mockall::automock;
use storefront::{carts::Cart, users::UserUuid};

use super::RepositoryError;

#[automock]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// The user's cart with its products resolved, if one was ever saved.
    async fn find_by_user_id(&self, user: UserUuid) -> Result<Option<Cart>, RepositoryError>;

    /// Insert or replace the user's cart and all of its lines.
    ///
    /// Returns the stored cart with products resolved.
    async fn save(&self, cart: &Cart) -> Result<Cart, RepositoryError>;
}

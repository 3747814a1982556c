//! Order repository contract.

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    orders::{Order, OrderUuid},
    users::UserUuid,
};

use super::RepositoryError;

#[automock]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// The user's orders, newest first.
    async fn find_by_user_id(&self, user: UserUuid) -> Result<Vec<Order>, RepositoryError>;

    /// Look an order up by id.
    async fn find_by_id(&self, id: OrderUuid) -> Result<Option<Order>, RepositoryError>;

    /// Insert or update an order and its lines.
    async fn save(&self, order: &Order) -> Result<Order, RepositoryError>;
}

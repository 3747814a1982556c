//! Order history.

use storefront::{
    DomainError,
    orders::{Order, OrderUuid},
    users::UserUuid,
};

use crate::{repositories::OrderRepository, use_cases::UseCaseError};

pub struct ListOrders<'a> {
    orders: &'a dyn OrderRepository,
}

impl<'a> ListOrders<'a> {
    #[must_use]
    pub fn new(orders: &'a dyn OrderRepository) -> Self {
        Self { orders }
    }

    /// The user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Only fails when the repository does.
    pub async fn execute(&self, user: UserUuid) -> Result<Vec<Order>, UseCaseError> {
        Ok(self.orders.find_by_user_id(user).await?)
    }
}

pub struct GetOrder<'a> {
    orders: &'a dyn OrderRepository,
}

impl<'a> GetOrder<'a> {
    #[must_use]
    pub fn new(orders: &'a dyn OrderRepository) -> Self {
        Self { orders }
    }

    /// # Errors
    ///
    /// Returns a not found error when the order does not exist and an authorization error when
    /// it belongs to someone else.
    pub async fn execute(&self, user: UserUuid, id: OrderUuid) -> Result<Order, UseCaseError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Order {id} not found")))?;

        if !order.belongs_to(user) {
            return Err(DomainError::authorization("Not authorized").into());
        }

        Ok(order)
    }
}

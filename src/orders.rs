//! Orders

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    errors::DomainError, prices::Price, products::ProductUuid, quantities::Quantity,
    users::UserUuid, uuids::TypedUuid,
};

/// Marker for order ids.
#[derive(Debug)]
pub struct OrderMarker;

/// Order identifier.
pub type OrderUuid = TypedUuid<OrderMarker>;

/// Order lifecycle state.
///
/// `pending → confirmed → shipped → delivered`, or `cancelled` from any state before delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether moving from `self` to `next` follows the lifecycle.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Shipped)
                | (Self::Shipped, Self::Delivered)
                | (Self::Pending | Self::Confirmed | Self::Shipped, Self::Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::validation(format!(
                "Unknown order status: {other}"
            ))),
        }
    }
}

/// One line of an order, priced when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: ProductUuid,
    pub quantity: Quantity,
    pub price: Price,
}

impl OrderItem {
    /// Captured price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.amount() * self.quantity.as_decimal()
    }
}

/// Placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderUuid,
    pub user_id: UserUuid,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: Option<Timestamp>,
}

impl Order {
    /// New pending order whose total is the sum of its lines.
    #[must_use]
    pub fn new(user_id: UserUuid, items: Vec<OrderItem>) -> Self {
        let total = items.iter().map(OrderItem::subtotal).sum();

        Self {
            id: OrderUuid::new(),
            user_id,
            items,
            total,
            status: OrderStatus::Pending,
            created_at: None,
        }
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the lifecycle does not allow the move.
    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::validation(format!(
                "Cannot change order status from {} to {next}",
                self.status
            )));
        }

        self.status = next;

        Ok(())
    }

    /// Whether `user` placed this order.
    #[must_use]
    pub fn belongs_to(&self, user: UserUuid) -> bool {
        self.user_id == user
    }
}

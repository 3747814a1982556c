//! Order payloads.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront::orders::{Order, OrderItem};
use uuid::Uuid;

use crate::money::money;

/// Order line, priced when the order was placed
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub product_id: Uuid,
    pub quantity: u32,
    pub price: String,
    pub subtotal: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            product_id: item.product_id.into_uuid(),
            quantity: item.quantity.value(),
            price: money(item.price.amount()),
            subtotal: money(item.subtotal()),
        }
    }
}

/// Order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: Uuid,
    pub items: Vec<OrderItemResponse>,
    pub total: String,

    /// One of `pending`, `confirmed`, `shipped`, `delivered` or `cancelled`
    pub status: String,

    pub created_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id.into_uuid(),
            items: order.items.into_iter().map(Into::into).collect(),
            total: money(order.total),
            status: order.status.to_string(),
            created_at: order.created_at.map(|created_at| created_at.to_string()),
        }
    }
}

//! Cart payloads.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront::carts::{Cart, CartItem};
use uuid::Uuid;

use crate::money::money;

/// Cart line
///
/// Lines whose product no longer exists have an empty name and image and price at zero.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub product_id: Uuid,
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub quantity: u32,
    pub subtotal: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        let price = money(item.unit_price());
        let subtotal = money(item.subtotal());

        let (name, image_url) = item
            .product
            .map(|product| (product.name, product.image_url))
            .unwrap_or_default();

        CartItemResponse {
            product_id: item.product_id.into_uuid(),
            name,
            price,
            image_url,
            quantity: item.quantity.value(),
            subtotal,
        }
    }
}

/// Cart
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub id: Uuid,
    pub items: Vec<CartItemResponse>,
    pub total: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let total = money(cart.total());

        CartResponse {
            id: cart.id.into_uuid(),
            items: cart.items.into_iter().map(Into::into).collect(),
            total,
        }
    }
}

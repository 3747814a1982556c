//! Product payloads.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront::products::Product;
use uuid::Uuid;

use crate::money::money;

/// Product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,

    /// Unit price as a decimal string, e.g. `"29.99"`
    pub price: String,

    /// Units in stock
    pub stock: u32,

    pub image_url: String,
    pub category: String,
    pub parent_category: String,

    /// RFC 3339 creation time, absent for unsaved products
    pub created_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id.into_uuid(),
            name: product.name,
            description: product.description,
            price: money(product.price.amount()),
            stock: product.stock.value(),
            image_url: product.image_url,
            category: product.category,
            parent_category: product.parent_category,
            created_at: product.created_at.map(|created_at| created_at.to_string()),
        }
    }
}

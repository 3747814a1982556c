//! Products

use jiff::Timestamp;

use crate::{prices::Price, quantities::Quantity, uuids::TypedUuid};

/// Marker for product ids.
#[derive(Debug)]
pub struct ProductMarker;

/// Product identifier.
pub type ProductUuid = TypedUuid<ProductMarker>;

/// Catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock: Quantity,
    pub image_url: String,
    pub category: String,
    pub parent_category: String,
    pub created_at: Option<Timestamp>,
}

//! Carts
//!
//! A cart holds at most one line per product. Adding a product that is already present merges the
//! quantities, and totals are always recomputed from the current lines.

use rust_decimal::Decimal;

use crate::{
    errors::DomainError,
    products::{Product, ProductUuid},
    quantities::Quantity,
    users::UserUuid,
    uuids::TypedUuid,
};

/// Marker for cart ids.
#[derive(Debug)]
pub struct CartMarker;

/// Cart identifier.
pub type CartUuid = TypedUuid<CartMarker>;

/// One line of a cart.
///
/// `product` is `None` when the referenced product could not be resolved. Such a line prices at
/// zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: ProductUuid,
    pub product: Option<Product>,
    pub quantity: Quantity,
}

impl CartItem {
    /// Line for a resolved product.
    #[must_use]
    pub fn new(product: Product, quantity: Quantity) -> Self {
        Self {
            product_id: product.id,
            product: Some(product),
            quantity,
        }
    }

    /// Unit price, zero when unresolved.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.product
            .as_ref()
            .map_or(Decimal::ZERO, |product| product.price.amount())
    }

    /// Unit price times quantity, zero when unresolved.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price() * self.quantity.as_decimal()
    }
}

/// A user's shopping cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: CartUuid,
    pub user_id: UserUuid,
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Empty cart with a fresh id.
    #[must_use]
    pub fn empty(user_id: UserUuid) -> Self {
        Self {
            id: CartUuid::new(),
            user_id,
            items: Vec::new(),
        }
    }

    /// Add a line, merging quantities into an existing line for the same product.
    pub fn add_item(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);

                if existing.product.is_none() {
                    existing.product = item.product;
                }
            }
            None => self.items.push(item),
        }
    }

    /// Remove every line for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns a not found error, leaving the cart unchanged, when no line matched.
    pub fn remove_item(&mut self, product_id: ProductUuid) -> Result<(), DomainError> {
        let before = self.items.len();

        self.items.retain(|item| item.product_id != product_id);

        if self.items.len() == before {
            return Err(DomainError::not_found(format!(
                "Item with product_id {product_id} not found in cart"
            )));
        }

        Ok(())
    }

    /// Set the quantity of the line for `product_id`. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a negative quantity and a not found error when no line
    /// matches.
    pub fn update_item_quantity(
        &mut self,
        product_id: ProductUuid,
        quantity: i64,
    ) -> Result<(), DomainError> {
        let quantity = Quantity::try_from(quantity)?;

        if quantity.is_zero() {
            return self.remove_item(product_id);
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Item with product_id {product_id} not found in cart"
                ))
            })?;

        item.quantity = quantity;

        Ok(())
    }

    /// Sum of line subtotals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

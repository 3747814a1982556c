//! Cart use cases.

use storefront::{
    DomainError, Quantity,
    carts::{Cart, CartItem},
    products::ProductUuid,
    users::UserUuid,
};
use tracing::debug;

use crate::{
    repositories::{CartRepository, ProductRepository},
    use_cases::UseCaseError,
};

const CART_NOT_FOUND: &str = "Cart not found";

pub struct AddToCart<'a> {
    products: &'a dyn ProductRepository,
    carts: &'a dyn CartRepository,
}

impl<'a> AddToCart<'a> {
    #[must_use]
    pub fn new(products: &'a dyn ProductRepository, carts: &'a dyn CartRepository) -> Self {
        Self { products, carts }
    }

    /// Add `quantity` of a product to the user's cart, creating the cart on first use.
    ///
    /// # Errors
    ///
    /// Returns a not found error, without saving anything, when the product does not exist,
    /// whatever the quantity. An existing product with a `quantity` below one is a validation
    /// error.
    pub async fn execute(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: i64,
    ) -> Result<Cart, UseCaseError> {
        let product = self
            .products
            .find_by_id(product)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Product {product} not found")))?;

        let quantity = Quantity::try_from(quantity)?;

        if quantity.is_zero() {
            return Err(DomainError::validation("Quantity must be at least 1").into());
        }

        let mut cart = self
            .carts
            .find_by_user_id(user)
            .await?
            .unwrap_or_else(|| Cart::empty(user));

        debug!(cart = %cart.id, product = %product.id, %quantity, "adding to cart");

        cart.add_item(CartItem::new(product, quantity));

        Ok(self.carts.save(&cart).await?)
    }
}

pub struct RemoveFromCart<'a> {
    carts: &'a dyn CartRepository,
}

impl<'a> RemoveFromCart<'a> {
    #[must_use]
    pub fn new(carts: &'a dyn CartRepository) -> Self {
        Self { carts }
    }

    /// Remove a product's line from the user's cart.
    ///
    /// # Errors
    ///
    /// Returns a not found error when the user has no cart or the line does not exist.
    pub async fn execute(&self, user: UserUuid, product: ProductUuid) -> Result<Cart, UseCaseError> {
        let mut cart = self
            .carts
            .find_by_user_id(user)
            .await?
            .ok_or_else(|| DomainError::not_found(CART_NOT_FOUND))?;

        cart.remove_item(product)?;

        Ok(self.carts.save(&cart).await?)
    }
}

pub struct UpdateCartItem<'a> {
    carts: &'a dyn CartRepository,
}

impl<'a> UpdateCartItem<'a> {
    #[must_use]
    pub fn new(carts: &'a dyn CartRepository) -> Self {
        Self { carts }
    }

    /// Set the quantity of a product's line. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns a not found error when the user has no cart or the line does not exist, and a
    /// validation error for a negative quantity.
    pub async fn execute(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: i64,
    ) -> Result<Cart, UseCaseError> {
        let mut cart = self
            .carts
            .find_by_user_id(user)
            .await?
            .ok_or_else(|| DomainError::not_found(CART_NOT_FOUND))?;

        cart.update_item_quantity(product, quantity)?;

        Ok(self.carts.save(&cart).await?)
    }
}

pub struct GetCart<'a> {
    carts: &'a dyn CartRepository,
}

impl<'a> GetCart<'a> {
    #[must_use]
    pub fn new(carts: &'a dyn CartRepository) -> Self {
        Self { carts }
    }

    /// The user's cart, or an unsaved empty one.
    ///
    /// # Errors
    ///
    /// Only fails when the repository does.
    pub async fn execute(&self, user: UserUuid) -> Result<Cart, UseCaseError> {
        Ok(self
            .carts
            .find_by_user_id(user)
            .await?
            .unwrap_or_else(|| Cart::empty(user)))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use storefront::{Price, products::Product};
    use testresult::TestResult;

    use crate::repositories::{MockCartRepository, MockProductRepository};

    use super::*;

    fn product(cents: i64) -> TestResult<Product> {
        Ok(Product {
            id: ProductUuid::new(),
            name: "Slim Fit Jeans".to_string(),
            description: String::new(),
            price: Price::new(Decimal::new(cents, 2))?,
            stock: Quantity::new(10),
            image_url: String::new(),
            category: "Jeans".to_string(),
            parent_category: "Bottoms".to_string(),
            created_at: None,
        })
    }

    fn cart_with(user: UserUuid, product: &Product, quantity: u32) -> Cart {
        let mut cart = Cart::empty(user);

        cart.add_item(CartItem::new(product.clone(), Quantity::new(quantity)));

        cart
    }

    #[tokio::test]
    async fn add_creates_cart_on_first_use() -> TestResult {
        let user = UserUuid::new();
        let jeans = product(89_99)?;
        let jeans_id = jeans.id;

        let mut products = MockProductRepository::new();
        let mut carts = MockCartRepository::new();

        products
            .expect_find_by_id()
            .once()
            .return_once(move |_| Ok(Some(jeans)));
        carts.expect_find_by_user_id().once().return_once(|_| Ok(None));
        carts
            .expect_save()
            .once()
            .withf(move |cart| {
                cart.user_id == user
                    && cart.items.len() == 1
                    && cart.items.first().map(|item| *item.quantity) == Some(2)
            })
            .returning(|cart| Ok(cart.clone()));

        let cart = AddToCart::new(&products, &carts)
            .execute(user, jeans_id, 2)
            .await?;

        assert_eq!(cart.total(), Decimal::new(179_98, 2));

        Ok(())
    }

    #[tokio::test]
    async fn add_merges_into_existing_line() -> TestResult {
        let user = UserUuid::new();
        let jeans = product(10_00)?;
        let existing = cart_with(user, &jeans, 2);
        let jeans_id = jeans.id;

        let mut products = MockProductRepository::new();
        let mut carts = MockCartRepository::new();

        products
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(jeans)));
        carts
            .expect_find_by_user_id()
            .return_once(move |_| Ok(Some(existing)));
        carts.expect_save().returning(|cart| Ok(cart.clone()));

        let cart = AddToCart::new(&products, &carts)
            .execute(user, jeans_id, 3)
            .await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().map(|item| *item.quantity), Some(5));

        Ok(())
    }

    #[tokio::test]
    async fn add_unknown_product_saves_nothing() -> TestResult {
        let mut products = MockProductRepository::new();
        let mut carts = MockCartRepository::new();

        products.expect_find_by_id().times(4).returning(|_| Ok(None));
        carts.expect_find_by_user_id().never();
        carts.expect_save().never();

        let add = AddToCart::new(&products, &carts);

        for quantity in [1, 0, -1, i64::MAX] {
            let result = add
                .execute(UserUuid::new(), ProductUuid::new(), quantity)
                .await;

            assert!(
                matches!(result, Err(UseCaseError::Domain(DomainError::NotFound(_)))),
                "expected NotFound for {quantity}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn add_rejects_zero_and_negative_quantities() -> TestResult {
        let jeans = product(10_00)?;
        let jeans_id = jeans.id;

        let mut products = MockProductRepository::new();
        let mut carts = MockCartRepository::new();

        products
            .expect_find_by_id()
            .times(2)
            .returning(move |_| Ok(Some(jeans.clone())));
        carts.expect_find_by_user_id().never();
        carts.expect_save().never();

        let add = AddToCart::new(&products, &carts);

        for quantity in [0, -3] {
            let result = add.execute(UserUuid::new(), jeans_id, quantity).await;

            assert!(
                matches!(result, Err(UseCaseError::Domain(DomainError::Validation(_)))),
                "expected Validation for {quantity}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn remove_without_cart_is_not_found() -> TestResult {
        let mut carts = MockCartRepository::new();

        carts.expect_find_by_user_id().return_once(|_| Ok(None));
        carts.expect_save().never();

        let result = RemoveFromCart::new(&carts)
            .execute(UserUuid::new(), ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(UseCaseError::Domain(DomainError::NotFound(ref message))) if message == "Cart not found"),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_saves_cart_without_the_line() -> TestResult {
        let user = UserUuid::new();
        let jeans = product(10_00)?;
        let existing = cart_with(user, &jeans, 2);

        let mut carts = MockCartRepository::new();

        carts
            .expect_find_by_user_id()
            .return_once(move |_| Ok(Some(existing)));
        carts
            .expect_save()
            .once()
            .withf(|cart| cart.is_empty())
            .returning(|cart| Ok(cart.clone()));

        let cart = RemoveFromCart::new(&carts).execute(user, jeans.id).await?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn remove_missing_line_saves_nothing() -> TestResult {
        let user = UserUuid::new();
        let existing = cart_with(user, &product(10_00)?, 2);

        let mut carts = MockCartRepository::new();

        carts
            .expect_find_by_user_id()
            .return_once(move |_| Ok(Some(existing)));
        carts.expect_save().never();

        let result = RemoveFromCart::new(&carts)
            .execute(user, ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(UseCaseError::Domain(DomainError::NotFound(_)))),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_quantity() -> TestResult {
        let user = UserUuid::new();
        let jeans = product(10_00)?;
        let existing = cart_with(user, &jeans, 2);

        let mut carts = MockCartRepository::new();

        carts
            .expect_find_by_user_id()
            .return_once(move |_| Ok(Some(existing)));
        carts.expect_save().returning(|cart| Ok(cart.clone()));

        let cart = UpdateCartItem::new(&carts)
            .execute(user, jeans.id, 5)
            .await?;

        assert_eq!(cart.total(), Decimal::new(50_00, 2));

        Ok(())
    }

    #[tokio::test]
    async fn update_without_cart_is_not_found() -> TestResult {
        let mut carts = MockCartRepository::new();

        carts.expect_find_by_user_id().return_once(|_| Ok(None));

        let result = UpdateCartItem::new(&carts)
            .execute(UserUuid::new(), ProductUuid::new(), 1)
            .await;

        assert!(
            matches!(result, Err(UseCaseError::Domain(DomainError::NotFound(_)))),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_negative_quantity_is_validation_error() -> TestResult {
        let user = UserUuid::new();
        let jeans = product(10_00)?;
        let existing = cart_with(user, &jeans, 2);

        let mut carts = MockCartRepository::new();

        carts
            .expect_find_by_user_id()
            .return_once(move |_| Ok(Some(existing)));
        carts.expect_save().never();

        let result = UpdateCartItem::new(&carts)
            .execute(user, jeans.id, -1)
            .await;

        assert!(
            matches!(result, Err(UseCaseError::Domain(DomainError::Validation(_)))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_synthesizes_empty_cart_without_saving() -> TestResult {
        let user = UserUuid::new();
        let mut carts = MockCartRepository::new();

        carts.expect_find_by_user_id().return_once(|_| Ok(None));
        carts.expect_save().never();

        let cart = GetCart::new(&carts).execute(user).await?;

        assert_eq!(cart.user_id, user);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);

        Ok(())
    }
}

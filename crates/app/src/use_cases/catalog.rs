//! Catalogue use cases.

use storefront::{
    DomainError,
    products::{Product, ProductUuid},
    users::UserUuid,
};
use tracing::info;

use crate::{
    repositories::{Categories, ProductRepository, UserRepository},
    use_cases::UseCaseError,
};

pub struct ListProducts<'a> {
    products: &'a dyn ProductRepository,
}

impl<'a> ListProducts<'a> {
    #[must_use]
    pub fn new(products: &'a dyn ProductRepository) -> Self {
        Self { products }
    }

    /// A page of products in creation order. `None` lists everything from `offset`.
    ///
    /// # Errors
    ///
    /// Only fails when the repository does.
    pub async fn execute(
        &self,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Product>, UseCaseError> {
        Ok(self.products.find_all(offset, limit).await?)
    }
}

pub struct GetProduct<'a> {
    products: &'a dyn ProductRepository,
}

impl<'a> GetProduct<'a> {
    #[must_use]
    pub fn new(products: &'a dyn ProductRepository) -> Self {
        Self { products }
    }

    /// # Errors
    ///
    /// Returns a not found error when no product has this id.
    pub async fn execute(&self, id: ProductUuid) -> Result<Product, UseCaseError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Product {id} not found")).into())
    }
}

pub struct ListCategories<'a> {
    products: &'a dyn ProductRepository,
}

impl<'a> ListCategories<'a> {
    #[must_use]
    pub fn new(products: &'a dyn ProductRepository) -> Self {
        Self { products }
    }

    /// # Errors
    ///
    /// Only fails when the repository does.
    pub async fn execute(&self) -> Result<Categories, UseCaseError> {
        Ok(self.products.get_categories().await?)
    }
}

pub struct SaveProduct<'a> {
    users: &'a dyn UserRepository,
    products: &'a dyn ProductRepository,
}

impl<'a> SaveProduct<'a> {
    #[must_use]
    pub fn new(users: &'a dyn UserRepository, products: &'a dyn ProductRepository) -> Self {
        Self { users, products }
    }

    /// Insert or update `product` on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns an authorization error unless `actor` is an existing admin.
    pub async fn execute(
        &self,
        actor: UserUuid,
        product: Product,
    ) -> Result<Product, UseCaseError> {
        let is_admin = self
            .users
            .find_by_id(actor)
            .await?
            .is_some_and(|user| user.is_admin());

        if !is_admin {
            return Err(DomainError::authorization("Admin access required").into());
        }

        let saved = self.products.save(&product).await?;

        info!(product = %saved.id, %actor, "saved product");

        Ok(saved)
    }
}

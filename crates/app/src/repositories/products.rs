//! Product repository contract.

use std::collections::BTreeMap;

use async_trait::async_trait;
use mockall::automock;
use storefront::products::{Product, ProductUuid};

use super::RepositoryError;

/// Parent category mapped to its sorted, distinct child categories.
pub type Categories = BTreeMap<String, Vec<String>>;

#[automock]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Page through the catalogue in creation order. `None` means no limit.
    async fn find_all(
        &self,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Look a product up by id.
    async fn find_by_id(&self, id: ProductUuid) -> Result<Option<Product>, RepositoryError>;

    /// Insert or update a product. The creation time of an existing product is kept.
    async fn save(&self, product: &Product) -> Result<Product, RepositoryError>;

    /// Category tree of the catalogue.
    async fn get_categories(&self) -> Result<Categories, RepositoryError>;
}

//! Products Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};
use storefront::{
    Price, Quantity,
    products::{Product, ProductUuid},
};

use crate::{
    repositories::{Categories, ProductRepository, RepositoryError},
    store::postgres::{SharedTransaction, decode_error},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const FIND_PRODUCT_SQL: &str = include_str!("sql/find_product.sql");
const SAVE_PRODUCT_SQL: &str = include_str!("sql/save_product.sql");
const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");

#[derive(Debug, Clone)]
pub struct PgProductRepository {
    tx: SharedTransaction,
}

impl PgProductRepository {
    pub(crate) fn new(tx: SharedTransaction) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(
        &self,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let offset = i64::try_from(offset).map_err(|source| decode_error("offset", source))?;
        let limit = limit
            .map(i64::try_from)
            .transpose()
            .map_err(|source| decode_error("limit", source))?;

        let mut guard = self.tx.lock().await;

        let rows = query_as::<Postgres, ProductRow>(LIST_PRODUCTS_SQL)
            .bind(offset)
            .bind(limit)
            .fetch_all(guard.connection()?)
            .await?;

        Ok(rows.into_iter().map(|ProductRow(product)| product).collect())
    }

    async fn find_by_id(&self, id: ProductUuid) -> Result<Option<Product>, RepositoryError> {
        let mut guard = self.tx.lock().await;

        let row = query_as::<Postgres, ProductRow>(FIND_PRODUCT_SQL)
            .bind(id.into_uuid())
            .fetch_optional(guard.connection()?)
            .await?;

        Ok(row.map(|ProductRow(product)| product))
    }

    async fn save(&self, product: &Product) -> Result<Product, RepositoryError> {
        let mut guard = self.tx.lock().await;

        let ProductRow(saved) = query_as::<Postgres, ProductRow>(SAVE_PRODUCT_SQL)
            .bind(product.id.into_uuid())
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price.amount())
            .bind(i64::from(product.stock.value()))
            .bind(&product.image_url)
            .bind(&product.category)
            .bind(&product.parent_category)
            .bind(product.created_at.map(SqlxTimestamp::from))
            .fetch_one(guard.connection()?)
            .await?;

        Ok(saved)
    }

    async fn get_categories(&self) -> Result<Categories, RepositoryError> {
        let mut guard = self.tx.lock().await;

        let pairs: Vec<(String, String)> = query_as(LIST_CATEGORIES_SQL)
            .fetch_all(guard.connection()?)
            .await?;

        let mut categories = Categories::new();

        for (parent, child) in pairs {
            categories.entry(parent).or_default().push(child);
        }

        Ok(categories)
    }
}

pub(super) struct ProductRow(pub(super) Product);

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        try_get_product(row).map(Self)
    }
}

/// Decode the product columns of `row`.
pub(super) fn try_get_product(row: &PgRow) -> sqlx::Result<Product> {
    let price: Decimal = row.try_get("price")?;
    let stock: i64 = row.try_get("stock")?;

    Ok(Product {
        id: ProductUuid::from_uuid(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: Price::new(price).map_err(|source| decode_error("price", source))?,
        stock: Quantity::try_from(stock).map_err(|source| decode_error("stock", source))?,
        image_url: row.try_get("image_url")?,
        category: row.try_get("category")?,
        parent_category: row.try_get("parent_category")?,
        created_at: row
            .try_get::<Option<SqlxTimestamp>, _>("created_at")?
            .map(SqlxTimestamp::to_jiff),
    })
}

//! Carts Repository

use async_trait::async_trait;
use sqlx::{PgConnection, Postgres, Row, query, query_as};
use storefront::{
    Quantity,
    carts::{Cart, CartItem, CartUuid},
    products::ProductUuid,
    users::UserUuid,
};
use uuid::Uuid;

use crate::{
    repositories::{CartRepository, RepositoryError},
    store::postgres::{SharedTransaction, decode_error, products::try_get_product},
};

const FIND_CART_BY_USER_SQL: &str = include_str!("sql/find_cart_by_user.sql");
const LIST_CART_ITEMS_SQL: &str = include_str!("sql/list_cart_items.sql");
const UPSERT_CART_SQL: &str = include_str!("sql/upsert_cart.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("sql/delete_cart_items.sql");
const INSERT_CART_ITEM_SQL: &str = include_str!("sql/insert_cart_item.sql");

#[derive(Debug, Clone)]
pub struct PgCartRepository {
    tx: SharedTransaction,
}

impl PgCartRepository {
    pub(crate) fn new(tx: SharedTransaction) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn find_by_user_id(&self, user: UserUuid) -> Result<Option<Cart>, RepositoryError> {
        let mut guard = self.tx.lock().await;

        Ok(find_cart(guard.connection()?, user).await?)
    }

    async fn save(&self, cart: &Cart) -> Result<Cart, RepositoryError> {
        let mut guard = self.tx.lock().await;
        let conn = guard.connection()?;

        // A concurrent first save for the same user resolves to the existing cart row.
        let (cart_id,): (Uuid,) = query_as(UPSERT_CART_SQL)
            .bind(cart.id.into_uuid())
            .bind(cart.user_id.into_uuid())
            .fetch_one(&mut *conn)
            .await?;

        query(DELETE_CART_ITEMS_SQL)
            .bind(cart_id)
            .execute(&mut *conn)
            .await?;

        for (position, item) in (0_i32..).zip(&cart.items) {
            query(INSERT_CART_ITEM_SQL)
                .bind(cart_id)
                .bind(item.product_id.into_uuid())
                .bind(i64::from(item.quantity.value()))
                .bind(position)
                .execute(&mut *conn)
                .await?;
        }

        find_cart(conn, cart.user_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}

async fn find_cart(conn: &mut PgConnection, user: UserUuid) -> sqlx::Result<Option<Cart>> {
    let Some((id, user_id)) = query_as::<Postgres, (Uuid, Uuid)>(FIND_CART_BY_USER_SQL)
        .bind(user.into_uuid())
        .fetch_optional(&mut *conn)
        .await?
    else {
        return Ok(None);
    };

    let rows = query(LIST_CART_ITEMS_SQL)
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;

    let mut items = Vec::with_capacity(rows.len());

    for row in rows {
        let quantity: i64 = row.try_get("quantity")?;
        let resolved: Option<Uuid> = row.try_get("id")?;

        items.push(CartItem {
            product_id: ProductUuid::from_uuid(row.try_get("product_id")?),
            product: resolved.map(|_| try_get_product(&row)).transpose()?,
            quantity: Quantity::try_from(quantity)
                .map_err(|source| decode_error("quantity", source))?,
        });
    }

    Ok(Some(Cart {
        id: CartUuid::from_uuid(id),
        user_id: UserUuid::from_uuid(user_id),
        items,
    }))
}

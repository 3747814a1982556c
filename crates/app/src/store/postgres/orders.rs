//! Orders Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query, query_as};
use storefront::{
    Price, Quantity,
    orders::{Order, OrderItem, OrderStatus, OrderUuid},
    products::ProductUuid,
    users::UserUuid,
};
use uuid::Uuid;

use crate::{
    repositories::{OrderRepository, RepositoryError},
    store::postgres::{SharedTransaction, decode_error},
};

const LIST_ORDERS_BY_USER_SQL: &str = include_str!("sql/list_orders_by_user.sql");
const FIND_ORDER_SQL: &str = include_str!("sql/find_order.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const SAVE_ORDER_SQL: &str = include_str!("sql/save_order.sql");
const DELETE_ORDER_ITEMS_SQL: &str = include_str!("sql/delete_order_items.sql");
const INSERT_ORDER_ITEM_SQL: &str = include_str!("sql/insert_order_item.sql");

#[derive(Debug, Clone)]
pub struct PgOrderRepository {
    tx: SharedTransaction,
}

impl PgOrderRepository {
    pub(crate) fn new(tx: SharedTransaction) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_by_user_id(&self, user: UserUuid) -> Result<Vec<Order>, RepositoryError> {
        let mut guard = self.tx.lock().await;
        let conn = guard.connection()?;

        let orders = query_as::<Postgres, OrderRow>(LIST_ORDERS_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut *conn)
            .await?
            .into_iter()
            .map(|OrderRow(order)| order)
            .collect();

        Ok(attach_items(conn, orders).await?)
    }

    async fn find_by_id(&self, id: OrderUuid) -> Result<Option<Order>, RepositoryError> {
        let mut guard = self.tx.lock().await;
        let conn = guard.connection()?;

        let Some(OrderRow(order)) = query_as::<Postgres, OrderRow>(FIND_ORDER_SQL)
            .bind(id.into_uuid())
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };

        Ok(attach_items(conn, vec![order]).await?.into_iter().next())
    }

    async fn save(&self, order: &Order) -> Result<Order, RepositoryError> {
        let mut guard = self.tx.lock().await;
        let conn = guard.connection()?;

        let OrderRow(saved) = query_as::<Postgres, OrderRow>(SAVE_ORDER_SQL)
            .bind(order.id.into_uuid())
            .bind(order.user_id.into_uuid())
            .bind(order.total)
            .bind(order.status.as_str())
            .bind(order.created_at.map(SqlxTimestamp::from))
            .fetch_one(&mut *conn)
            .await?;

        query(DELETE_ORDER_ITEMS_SQL)
            .bind(saved.id.into_uuid())
            .execute(&mut *conn)
            .await?;

        for (position, item) in (0_i32..).zip(&order.items) {
            query(INSERT_ORDER_ITEM_SQL)
                .bind(saved.id.into_uuid())
                .bind(item.product_id.into_uuid())
                .bind(i64::from(item.quantity.value()))
                .bind(item.price.amount())
                .bind(position)
                .execute(&mut *conn)
                .await?;
        }

        Ok(Order {
            items: order.items.clone(),
            ..saved
        })
    }
}

async fn attach_items(conn: &mut PgConnection, mut orders: Vec<Order>) -> sqlx::Result<Vec<Order>> {
    if orders.is_empty() {
        return Ok(orders);
    }

    let ids: Vec<Uuid> = orders.iter().map(|order| order.id.into_uuid()).collect();

    let rows = query(LIST_ORDER_ITEMS_SQL)
        .bind(ids)
        .fetch_all(&mut *conn)
        .await?;

    let mut items: FxHashMap<Uuid, Vec<OrderItem>> = FxHashMap::default();

    for row in rows {
        let quantity: i64 = row.try_get("quantity")?;
        let price: Decimal = row.try_get("price")?;

        items
            .entry(row.try_get("order_id")?)
            .or_default()
            .push(OrderItem {
                product_id: ProductUuid::from_uuid(row.try_get("product_id")?),
                quantity: Quantity::try_from(quantity)
                    .map_err(|source| decode_error("quantity", source))?,
                price: Price::new(price).map_err(|source| decode_error("price", source))?,
            });
    }

    for order in &mut orders {
        order.items = items.remove(&order.id.into_uuid()).unwrap_or_default();
    }

    Ok(orders)
}

struct OrderRow(Order);

impl<'r> FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self(Order {
            id: OrderUuid::from_uuid(row.try_get("id")?),
            user_id: UserUuid::from_uuid(row.try_get("user_id")?),
            items: Vec::new(),
            total: row.try_get("total")?,
            status: status
                .parse::<OrderStatus>()
                .map_err(|source| decode_error("status", source))?,
            created_at: row
                .try_get::<Option<SqlxTimestamp>, _>("created_at")?
                .map(SqlxTimestamp::to_jiff),
        }))
    }
}

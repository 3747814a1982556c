//! `PostgreSQL` store.

use std::{error::Error as StdError, fmt, sync::Arc};

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::{
    repositories::{
        CartRepository, OrderRepository, ProductRepository, RepositoryError, UserRepository,
    },
    store::{Store, UnitOfWork},
};

mod carts;
mod orders;
mod products;
mod users;

pub use carts::PgCartRepository;
pub use orders::PgOrderRepository;
pub use products::PgProductRepository;
pub use users::PgUserRepository;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError> {
        let tx = SharedTransaction::new(self.pool.begin().await?);

        Ok(Box::new(PgUnitOfWork {
            users: PgUserRepository::new(tx.clone()),
            products: PgProductRepository::new(tx.clone()),
            carts: PgCartRepository::new(tx.clone()),
            orders: PgOrderRepository::new(tx.clone()),
            tx,
        }))
    }
}

/// Unit of work over one `PostgreSQL` transaction.
///
/// The transaction rolls back when this is dropped without [`UnitOfWork::commit`].
#[derive(Debug)]
pub struct PgUnitOfWork {
    tx: SharedTransaction,
    users: PgUserRepository,
    products: PgProductRepository,
    carts: PgCartRepository,
    orders: PgOrderRepository,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }

    fn carts(&self) -> &dyn CartRepository {
        &self.carts
    }

    fn orders(&self) -> &dyn OrderRepository {
        &self.orders
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let tx = self.tx.take().await.ok_or(RepositoryError::Finished)?;

        tx.commit().await?;

        debug!("unit of work committed");

        Ok(())
    }
}

/// A transaction shared by every repository of one unit of work.
#[derive(Clone)]
pub struct SharedTransaction(Arc<Mutex<Option<Transaction<'static, Postgres>>>>);

impl SharedTransaction {
    fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self(Arc::new(Mutex::new(Some(tx))))
    }

    pub(crate) async fn lock(&self) -> TransactionGuard<'_> {
        TransactionGuard(self.0.lock().await)
    }

    async fn take(&self) -> Option<Transaction<'static, Postgres>> {
        self.0.lock().await.take()
    }
}

impl fmt::Debug for SharedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedTransaction").finish_non_exhaustive()
    }
}

pub(crate) struct TransactionGuard<'a>(MutexGuard<'a, Option<Transaction<'static, Postgres>>>);

impl TransactionGuard<'_> {
    pub(crate) fn connection(&mut self) -> Result<&mut PgConnection, RepositoryError> {
        self.0
            .as_mut()
            .map(|tx| &mut **tx)
            .ok_or(RepositoryError::Finished)
    }
}

/// Wrap a value conversion failure as a column decode error.
pub(crate) fn decode_error<E>(column: &str, source: E) -> sqlx::Error
where
    E: StdError + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

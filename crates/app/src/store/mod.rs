//! Stores and units of work
//!
//! A [`Store`] hands out one [`UnitOfWork`] per request. Every repository obtained from a unit
//! of work shares its transaction; nothing becomes visible to other units of work until
//! [`UnitOfWork::commit`] succeeds, and dropping an uncommitted unit of work discards its writes.

use async_trait::async_trait;

use crate::repositories::{
    CartRepository, OrderRepository, ProductRepository, RepositoryError, UserRepository,
};

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Start a unit of work.
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError>;
}

#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> &dyn UserRepository;

    fn products(&self) -> &dyn ProductRepository;

    fn carts(&self) -> &dyn CartRepository;

    fn orders(&self) -> &dyn OrderRepository;

    /// Make every write performed through this unit of work durable.
    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;
}

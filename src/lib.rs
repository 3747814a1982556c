//! Storefront
//!
//! Domain model for an online storefront: users, a product catalogue, shopping carts and orders.
//! This crate performs no I/O; persistence and transport live in the `storefront-app` and
//! `storefront-json` crates.

pub mod carts;
pub mod errors;
pub mod orders;
pub mod prices;
pub mod products;
pub mod quantities;
pub mod users;
pub mod uuids;

pub use errors::{DomainError, DomainErrorKind};
pub use prices::Price;
pub use quantities::Quantity;

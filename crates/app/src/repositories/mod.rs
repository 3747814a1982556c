//! Repository contracts
//!
//! Persistence abstractions over one entity type each. Implementations live in
//! [`crate::store`]; use cases only ever see these traits.

mod carts;
mod errors;
mod orders;
mod products;
mod users;

pub use carts::*;
pub use errors::RepositoryError;
pub use orders::*;
pub use products::*;
pub use users::*;

//! Use cases
//!
//! One type per application operation. Each is built over the repositories (and services) it
//! needs, usually borrowed from a request's [`UnitOfWork`](crate::store::UnitOfWork), and exposes
//! a single `execute` method.

mod auth;
mod carts;
mod catalog;
mod errors;
mod orders;

pub use auth::*;
pub use carts::*;
pub use catalog::*;
pub use errors::UseCaseError;
pub use orders::*;

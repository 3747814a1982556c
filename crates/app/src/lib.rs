//! Storefront application layer: repository contracts, use cases, and their `PostgreSQL` and
//! authentication infrastructure.

pub mod auth;
pub mod context;
pub mod database;
pub mod repositories;
pub mod seed;
pub mod store;
pub mod use_cases;

#[cfg(test)]
mod test;

//! Carts

mod handlers;
pub(crate) mod items;
mod models;

pub(crate) use handlers::*;
pub(crate) use models::*;

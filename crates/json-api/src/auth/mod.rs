//! Authentication

pub(crate) mod cookies;
mod handlers;
pub(crate) mod middleware;
mod models;

pub(crate) use handlers::*;
pub(crate) use models::*;

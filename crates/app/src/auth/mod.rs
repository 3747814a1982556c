//! Authentication

mod errors;
mod passwords;
mod tokens;

pub use errors::*;
pub use passwords::*;
pub use tokens::*;

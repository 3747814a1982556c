//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;
use storefront_app::use_cases::GetCart;

use crate::{carts::CartResponse, errors::into_status_error, extensions::*, state::State};

/// Get Cart Handler
///
/// Returns the caller's cart. Users without one get an empty cart that is not stored.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
    )
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let user = depot.user_uuid_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let cart = GetCart::new(uow.carts())
        .execute(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

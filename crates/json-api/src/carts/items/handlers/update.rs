//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::products::ProductUuid;
use storefront_app::use_cases::UpdateCartItem;

use crate::{carts::CartResponse, errors::into_status_error, extensions::*, state::State};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity; zero removes the line
    pub quantity: i64,
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Negative quantity"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let user = depot.user_uuid_or_401()?;
    let product = ProductUuid::parse(&product.into_inner()).map_err(into_status_error)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let cart = UpdateCartItem::new(uow.carts())
        .execute(user, product, json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    uow.commit().await.map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

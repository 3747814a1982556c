//! Create Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::products::ProductUuid;
use storefront_app::use_cases::AddToCart;

use crate::{carts::CartResponse, errors::into_status_error, extensions::*, state::State};

const fn default_quantity() -> i64 {
    1
}

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToCartRequest {
    pub product_id: String,

    /// Units to add, merged into an existing line for the same product
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Create Cart Item Handler
///
/// Adds a product to the caller's cart, creating the cart on first use.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid product id or quantity"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();
    let product = ProductUuid::parse(&request.product_id).map_err(into_status_error)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let cart = AddToCart::new(uow.products(), uow.carts())
        .execute(user, product, request.quantity)
        .await
        .map_err(into_status_error)?;

    uow.commit().await.map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

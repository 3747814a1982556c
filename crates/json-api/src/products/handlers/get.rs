//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use storefront::products::ProductUuid;
use storefront_app::use_cases::GetProduct;

use crate::{errors::into_status_error, extensions::*, products::ProductResponse, state::State};

/// Get Product Handler
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Malformed product id"),
    )
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let id = ProductUuid::parse(&product.into_inner()).map_err(into_status_error)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let product = GetProduct::new(uow.products())
        .execute(id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

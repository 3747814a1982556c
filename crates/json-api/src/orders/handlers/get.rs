//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use storefront::orders::OrderUuid;
use storefront_app::use_cases::GetOrder;

use crate::{errors::into_status_error, extensions::*, orders::OrderResponse, state::State};

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
    )
)]
pub(crate) async fn handler(
    order: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let user = depot.user_uuid_or_401()?;
    let id = OrderUuid::parse(&order.into_inner()).map_err(into_status_error)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let order = GetOrder::new(uow.orders())
        .execute(user, id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

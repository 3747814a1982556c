//! Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;
use storefront_app::use_cases::ListOrders;

use crate::{errors::into_status_error, extensions::*, orders::OrderResponse, state::State};

/// Order Index Handler
///
/// Returns the caller's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
    )
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let user = depot.user_uuid_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let orders = ListOrders::new(uow.orders())
        .execute(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{authenticated_service, bearer, register, test_state};

    use super::{super::tests::place_order, *};

    #[tokio::test]
    async fn test_index_lists_only_own_orders_newest_first() -> TestResult {
        let state = test_state()?;
        let user = register(&state, "shopper@example.com", "secret").await?;
        let other = register(&state, "other@example.com", "secret").await?;

        let first = place_order(&state, user, 1, 10_00).await?;
        place_order(&state, other, 1, 99_00).await?;
        let second = place_order(&state, user, 2, 12_50).await?;

        let orders: Vec<OrderResponse> = TestClient::get("http://example.com/orders")
            .add_header(AUTHORIZATION, bearer(&state, user)?, true)
            .send(&authenticated_service(
                state,
                Router::with_path("orders").get(handler),
            ))
            .await
            .take_json()
            .await?;

        let ids: Vec<_> = orders.iter().map(|order| order.id).collect();

        assert_eq!(ids, vec![second.id.into_uuid(), first.id.into_uuid()]);
        assert_eq!(orders.first().map(|order| order.total.as_str()), Some("25.00"));
        assert_eq!(orders.first().map(|order| order.status.as_str()), Some("pending"));

        Ok(())
    }
}

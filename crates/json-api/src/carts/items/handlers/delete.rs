//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use storefront::products::ProductUuid;
use storefront_app::use_cases::RemoveFromCart;

use crate::{carts::CartResponse, errors::into_status_error, extensions::*, state::State};

/// Delete Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let user = depot.user_uuid_or_401()?;
    let product = ProductUuid::parse(&product.into_inner()).map_err(into_status_error)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let cart = RemoveFromCart::new(uow.carts())
        .execute(user, product)
        .await
        .map_err(into_status_error)?;

    uow.commit().await.map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use storefront::{
        Quantity,
        carts::{Cart, CartItem},
    };
    use testresult::TestResult;

    use crate::test_helpers::{add_product, authenticated_service, bearer, register, test_state};

    use super::*;

    fn make_service(state: Arc<State>) -> Service {
        authenticated_service(
            state,
            Router::with_path("cart/items/{product}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_line() -> TestResult {
        let state = test_state()?;
        let user = register(&state, "shopper@example.com", "secret").await?;
        let tee = add_product(&state, "Tee", 10_00, "T-Shirts", "Tops").await?;
        let hat = add_product(&state, "Hat", 15_00, "Hats", "Accessories").await?;
        let tee_id = tee.id;

        let uow = state.app.begin().await?;
        let mut cart = Cart::empty(user);

        cart.add_item(CartItem::new(tee, Quantity::new(1)));
        cart.add_item(CartItem::new(hat, Quantity::new(2)));
        uow.carts().save(&cart).await?;
        uow.commit().await?;

        let cart: CartResponse =
            TestClient::delete(format!("http://example.com/cart/items/{tee_id}"))
                .add_header(AUTHORIZATION, bearer(&state, user)?, true)
                .send(&make_service(state))
                .await
                .take_json()
                .await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().map(|line| line.name.as_str()), Some("Hat"));
        assert_eq!(cart.total, "30.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_absent_item_returns_404() -> TestResult {
        let state = test_state()?;
        let user = register(&state, "shopper@example.com", "secret").await?;
        let tee = add_product(&state, "Tee", 10_00, "T-Shirts", "Tops").await?;

        let uow = state.app.begin().await?;
        let mut cart = Cart::empty(user);

        cart.add_item(CartItem::new(tee, Quantity::new(1)));
        uow.carts().save(&cart).await?;
        uow.commit().await?;

        let res = TestClient::delete(format!(
            "http://example.com/cart/items/{}",
            ProductUuid::new()
        ))
        .add_header(AUTHORIZATION, bearer(&state, user)?, true)
        .send(&make_service(state))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}

//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use storefront_app::use_cases::ListProducts;

use crate::{errors::into_status_error, extensions::*, products::ProductResponse, state::State};

/// Product Index Handler
///
/// Returns products in creation order. `limit` must be at least 1 when given.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Products"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid limit"),
    )
)]
pub(crate) async fn handler(
    offset: QueryParam<u64, false>,
    limit: QueryParam<u64, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let limit = limit.into_inner();

    if limit == Some(0) {
        return Err(StatusError::unprocessable_entity().brief("limit must be at least 1"));
    }

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let products = ListProducts::new(uow.products())
        .execute(offset.into_inner().unwrap_or_default(), limit)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{add_product, service, test_state};

    use super::*;

    fn make_service(state: Arc<State>) -> Service {
        service(state, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(test_state()?))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let products: Vec<ProductResponse> = res.take_json().await?;

        assert!(products.is_empty(), "no products should be listed");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_pages_products() -> TestResult {
        let state = test_state()?;

        add_product(&state, "Tee", 19_99, "T-Shirts", "Tops").await?;
        add_product(&state, "Hoodie", 49_99, "Hoodies", "Tops").await?;
        add_product(&state, "Jeans", 59_99, "Pants", "Bottoms").await?;

        let products: Vec<ProductResponse> =
            TestClient::get("http://example.com/products?offset=1&limit=1")
                .send(&make_service(state))
                .await
                .take_json()
                .await?;

        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.name.as_str()), Some("Hoodie"));
        assert_eq!(products.first().map(|p| p.price.as_str()), Some("49.99"));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_rejects_zero_limit() -> TestResult {
        let res = TestClient::get("http://example.com/products?limit=0")
            .send(&make_service(test_state()?))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}

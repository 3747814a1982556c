//! Save Product Handler

use std::{str::FromStr, sync::Arc};

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::{
    DomainError, Price, Quantity,
    products::{Product, ProductUuid},
};
use storefront_app::use_cases::SaveProduct;

use crate::{errors::into_status_error, extensions::*, products::ProductResponse, state::State};

/// Save Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveProductRequest {
    pub name: String,
    pub description: String,

    /// Unit price as a decimal string, e.g. `"29.99"`
    pub price: String,

    pub stock: u32,

    #[serde(default)]
    pub image_url: String,

    pub category: String,
    pub parent_category: String,
}

impl SaveProductRequest {
    fn into_product(self, id: ProductUuid) -> Result<Product, DomainError> {
        let amount = Decimal::from_str(self.price.trim())
            .map_err(|_parse_error| DomainError::validation("Invalid price"))?;

        Ok(Product {
            id,
            name: self.name,
            description: self.description,
            price: Price::new(amount)?,
            stock: Quantity::new(self.stock),
            image_url: self.image_url,
            category: self.category,
            parent_category: self.parent_category,
            created_at: None,
        })
    }
}

/// Save Product Handler
///
/// Creates or replaces the product with the given id. Admin only.
#[endpoint(
    tags("admin"),
    summary = "Save Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product saved"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid product"),
    )
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<SaveProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let actor = depot.user_uuid_or_401()?;

    let id = ProductUuid::parse(&product.into_inner()).map_err(into_status_error)?;
    let product = json.into_inner().into_product(id).map_err(into_status_error)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let saved = SaveProduct::new(uow.users(), uow.products())
        .execute(actor, product)
        .await
        .map_err(into_status_error)?;

    uow.commit().await.map_err(into_status_error)?;

    Ok(Json(saved.into()))
}

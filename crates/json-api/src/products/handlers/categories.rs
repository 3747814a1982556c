//! Product Categories Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::prelude::*;
use storefront_app::use_cases::ListCategories;

use crate::{errors::into_status_error, extensions::*, state::State};

/// Product Categories Handler
///
/// Returns child categories grouped by parent, both sorted by name.
#[endpoint(tags("products"), summary = "List Categories")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<BTreeMap<String, Vec<String>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let categories = ListCategories::new(uow.products())
        .execute()
        .await
        .map_err(into_status_error)?;

    Ok(Json(categories))
}

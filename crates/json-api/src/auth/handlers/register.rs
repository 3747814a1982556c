//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront_app::use_cases::{RegisterUser, RegisterUserInput};

use crate::{auth::AuthResponse, errors::into_status_error, extensions::*, state::State};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    /// Login email address
    pub email: String,

    /// Display name
    pub name: String,

    /// Plaintext password
    pub password: String,
}

impl From<RegisterRequest> for RegisterUserInput {
    fn from(request: RegisterRequest) -> Self {
        RegisterUserInput {
            email: request.email,
            name: request.name,
            password: request.password,
        }
    }
}

/// Register Handler
///
/// Creates a customer account, signs it in and sets the refresh token cookie.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::OK, description = "Account created"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid or taken email"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    )
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let result = RegisterUser::new(
        uow.users(),
        state.app.passwords.as_ref(),
        state.app.tokens.as_ref(),
    )
    .execute(json.into_inner().into())
    .await
    .map_err(into_status_error)?;

    let refresh_token = state
        .app
        .tokens
        .generate_refresh_token(result.user_id)
        .map_err(into_status_error)?;

    uow.commit().await.map_err(into_status_error)?;

    state.refresh_cookie.set(res, refresh_token);

    Ok(Json(result.into()))
}

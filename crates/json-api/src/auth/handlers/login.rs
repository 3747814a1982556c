//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront_app::use_cases::{LoginUser, LoginUserInput};

use crate::{auth::AuthResponse, errors::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginUserInput {
    fn from(request: LoginRequest) -> Self {
        LoginUserInput {
            email: request.email,
            password: request.password,
        }
    }
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    )
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uow = state.app.begin().await.map_err(into_status_error)?;

    let result = LoginUser::new(
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

    state.refresh_cookie.set(res, refresh_token);

    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{register, service, test_state};

    use super::*;

    fn make_service(state: Arc<State>) -> Service {
        service(state, Router::with_path("auth/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials_returns_token() -> TestResult {
        let state = test_state()?;
        let user = register(&state, "shopper@example.com", "secret").await?;

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "shopper@example.com", "password": "secret" }))
            .send(&make_service(state))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            res.cookie("refresh_token").is_some(),
            "refresh cookie should be set"
        );

        let body: AuthResponse = res.take_json().await?;

        assert_eq!(body.user_id, user.into_uuid());
        assert_eq!(body.token_type, "bearer");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_returns_401() -> TestResult {
        let state = test_state()?;

        register(&state, "shopper@example.com", "secret").await?;

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "shopper@example.com", "password": "wrong" }))
            .send(&make_service(state))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert!(
            res.cookie("refresh_token").is_none(),
            "no cookie on failure"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_login_with_unknown_email_returns_401() -> TestResult {
        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "nobody@example.com", "password": "secret" }))
            .send(&make_service(test_state()?))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}

//! Refresh Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use storefront_app::use_cases::{RefreshSession, TOKEN_TYPE};

use crate::{errors::into_status_error, extensions::*, state::State};

/// Refresh Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Refresh Handler
///
/// Exchanges the refresh token cookie for a new access token and rotates the cookie.
#[endpoint(
    tags("auth"),
    summary = "Refresh Session",
    responses(
        (status_code = StatusCode::OK, description = "Session refreshed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid refresh token, or unknown user"),
    )
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RefreshResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let uow = state.app.begin().await.map_err(into_status_error)?;

    let session = RefreshSession::new(uow.users(), state.app.tokens.as_ref())
        .execute(state.refresh_cookie.read(req))
        .await
        .map_err(into_status_error)?;

    state.refresh_cookie.set(res, session.refresh_token);

    Ok(Json(RefreshResponse {
        access_token: session.access_token,
        token_type: TOKEN_TYPE.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::COOKIE,
        test::{ResponseExt, TestClient},
    };
    use storefront::users::UserUuid;
    use storefront_app::auth::TokenKind;
    use testresult::TestResult;

    use crate::test_helpers::{register, service, test_state};

    use super::*;

    fn make_service(state: Arc<State>) -> Service {
        service(state, Router::with_path("auth/refresh").post(handler))
    }

    #[tokio::test]
    async fn test_refresh_rotates_cookie_and_issues_access_token() -> TestResult {
        let state = test_state()?;
        let user = register(&state, "refresh@example.com", "test123").await?;
        let refresh_token = state.app.tokens.generate_refresh_token(user)?;

        let mut res = TestClient::post("http://example.com/auth/refresh")
            .add_header(COOKIE, format!("refresh_token={refresh_token}"), true)
            .send(&make_service(state.clone()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            res.cookie("refresh_token").is_some(),
            "refresh cookie should be rotated"
        );

        let body: RefreshResponse = res.take_json().await?;

        assert_eq!(body.token_type, "bearer");
        assert_eq!(
            state.app.tokens.verify(&body.access_token, TokenKind::Access)?,
            user
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_without_cookie_returns_401() -> TestResult {
        let res = TestClient::post("http://example.com/auth/refresh")
            .send(&make_service(test_state()?))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_with_access_token_returns_401() -> TestResult {
        let state = test_state()?;
        let access_token = state.app.tokens.generate(UserUuid::new())?;

        let res = TestClient::post("http://example.com/auth/refresh")
            .add_header(COOKIE, format!("refresh_token={access_token}"), true)
            .send(&make_service(state))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_for_unknown_user_returns_401() -> TestResult {
        let state = test_state()?;
        let refresh_token = state.app.tokens.generate_refresh_token(UserUuid::new())?;

        let res = TestClient::post("http://example.com/auth/refresh")
            .add_header(COOKIE, format!("refresh_token={refresh_token}"), true)
            .send(&make_service(state))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert!(
            res.cookie("refresh_token").is_none(),
            "no cookie should be issued"
        );

        Ok(())
    }
}

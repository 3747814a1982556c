//! Logout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Logout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LogoutResponse {
    pub message: String,
}

/// Logout Handler
///
/// Clears the refresh token cookie. Access tokens stay valid until they expire.
#[endpoint(tags("auth"), summary = "Logout")]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<LogoutResponse>, StatusError> {
    depot
        .obtain_or_500::<Arc<State>>()?
        .refresh_cookie
        .clear(res);

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

//! Auth payloads.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront_app::use_cases::AuthResult;
use uuid::Uuid;

/// Issued session
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthResponse {
    /// Bearer token for authenticated requests
    pub access_token: String,

    /// Always `bearer`
    pub token_type: String,

    /// The authenticated user
    pub user_id: Uuid,

    /// The user's display name
    pub name: String,
}

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            access_token: result.access_token,
            token_type: result.token_type.to_string(),
            user_id: result.user_id.into_uuid(),
            name: result.name,
        }
    }
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::credential::errors::AuthError;
use crate::inbound::http::handlers::AccountData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationData {
    #[serde(flatten)]
    pub account: AccountData,
    pub token_expires_at: DateTime<Utc>,
}

/// Resolve a verified access token to the account it names.
///
/// A valid token whose account is gone is still an authorization failure.
pub async fn authorize(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<AuthorizationData>, ApiError> {
    let record = state
        .accounts
        .get_account(&user.user_id)
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound => ApiError::from(AuthError::AuthorizationFailed),
            other => ApiError::from(other),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthorizationData {
            account: (&record).into(),
            token_expires_at: user.token_expires_at,
        },
    ))
}

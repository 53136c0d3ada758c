use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::AccountData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .accounts
        .get_account(&user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|record| ApiSuccess::new(StatusCode::OK, (&record).into()))
}

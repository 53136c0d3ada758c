use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::inbound::http::handlers::AccountData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct ChangeEmailRequest {
    pub email: String,
}

pub async fn change_email(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<ChangeEmailRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .accounts
        .change_email(&user.user_id, &req.email)
        .await
        .map_err(ApiError::from)
        .map(|record| ApiSuccess::new(StatusCode::OK, (&record).into()))
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::messages::SessionData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    state
        .user_service
        .refresh_session(&body.refresh_token)
        .await
        .map_err(|e| match e {
            // The subject vanished since the token was issued
            UserError::NotFound(_) => ApiError::Unauthorized(e.to_string()),
            _ => ApiError::from(e),
        })
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequest {
    refresh_token: String,
}

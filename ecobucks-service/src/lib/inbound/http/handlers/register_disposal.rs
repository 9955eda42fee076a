use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::disposal::models::Disposal;
use crate::domain::disposal::models::RegisterDisposalCommand;
use crate::domain::disposal::ports::DisposalServicePort;
use crate::inbound::http::messages::DisposalClaimData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn register_disposal(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(body): Json<RegisterDisposalRequest>,
) -> Result<ApiSuccess<DisposalClaimData>, ApiError> {
    let command = RegisterDisposalCommand::new(&current.user, body.disposals)?;

    state
        .disposal_service
        .register_disposal(command)
        .await
        .map_err(ApiError::from)
        .map(|ref claim| ApiSuccess::new(StatusCode::CREATED, claim.into()))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterDisposalRequest {
    disposals: Vec<Disposal>,
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::disposal::ports::DisposalServicePort;
use crate::inbound::http::messages::DisposalClaimData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_disposals(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<DisposalClaimData>>, ApiError> {
    state
        .disposal_service
        .list_disposals(&current.user)
        .await
        .map_err(ApiError::from)
        .map(|claims| {
            ApiSuccess::new(
                StatusCode::OK,
                claims.iter().map(DisposalClaimData::from).collect(),
            )
        })
}

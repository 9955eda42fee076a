use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::disposal::ports::ClaimedDisposal;
use crate::domain::disposal::ports::DisposalServicePort;
use crate::inbound::http::messages::DisposalClaimData;
use crate::inbound::http::messages::ProfileData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn claim_disposal(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(body): Json<ClaimDisposalRequest>,
) -> Result<ApiSuccess<ClaimDisposalResponseData>, ApiError> {
    state
        .disposal_service
        .claim_disposal(&current.user, &body.disposal_token)
        .await
        .map_err(ApiError::from)
        .map(|ref claimed| ApiSuccess::new(StatusCode::OK, claimed.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClaimDisposalRequest {
    disposal_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimDisposalResponseData {
    pub disposal: DisposalClaimData,
    pub user: ProfileData,
}

impl From<&ClaimedDisposal> for ClaimDisposalResponseData {
    fn from(claimed: &ClaimedDisposal) -> Self {
        Self {
            disposal: (&claimed.claim).into(),
            user: (&claimed.user).into(),
        }
    }
}

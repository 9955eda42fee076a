use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::station::models::RegisterStationCommand;
use crate::inbound::http::messages::LocationData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn register_station(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(body): Json<RegisterStationRequest>,
) -> Result<ApiSuccess<LocationData>, ApiError> {
    let command = RegisterStationCommand::new(
        &current.user,
        body.latitude,
        body.longitude,
        body.station_id,
    )?;

    let location = state.station_registry.register(command).await;

    Ok(ApiSuccess::new(StatusCode::CREATED, (&location).into()))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterStationRequest {
    latitude: f32,
    longitude: f32,
    station_id: String,
}

use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::messages::LocationData;
use crate::inbound::http::router::AppState;

pub async fn list_stations(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<LocationData>>, ApiError> {
    let stations = state.station_registry.list().await;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        stations.iter().map(LocationData::from).collect(),
    ))
}

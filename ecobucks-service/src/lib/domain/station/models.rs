use crate::domain::station::errors::StationError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Last reported position of a collection station.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationClaim {
    pub latitude: f32,
    pub longitude: f32,
    /// Unix seconds at registration
    pub timestamp: i64,
    pub station_id: String,
}

/// Command to publish a station position on behalf of an operator.
#[derive(Debug, Clone)]
pub struct RegisterStationCommand {
    pub operator_id: UserId,
    pub latitude: f32,
    pub longitude: f32,
    pub station_id: String,
}

impl RegisterStationCommand {
    /// # Errors
    /// * `NotOperator` - `operator` is not an operator
    /// * `InvalidLocation` - Coordinates out of range or empty station id
    pub fn new(
        operator: &User,
        latitude: f32,
        longitude: f32,
        station_id: String,
    ) -> Result<Self, StationError> {
        if !operator.is_operator {
            return Err(StationError::NotOperator);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(StationError::InvalidLocation(format!(
                "latitude out of range: {}",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(StationError::InvalidLocation(format!(
                "longitude out of range: {}",
                longitude
            )));
        }
        if station_id.trim().is_empty() {
            return Err(StationError::InvalidLocation(
                "station_id must not be empty".to_string(),
            ));
        }

        Ok(Self {
            operator_id: operator.id,
            latitude,
            longitude,
            station_id,
        })
    }
}

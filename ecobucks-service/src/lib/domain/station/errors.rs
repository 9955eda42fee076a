use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StationError {
    #[error("User is not an operator")]
    NotOperator,

    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}

use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Error type for DisposalClaimId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisposalClaimIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error type for all disposal-related operations
#[derive(Debug, Clone, Error)]
pub enum DisposalError {
    #[error("User is not an operator")]
    NotOperator,

    #[error("Disposal claim must contain at least one disposal")]
    EmptyDisposal,

    #[error("Invalid disposal: {0}")]
    InvalidDisposal(String),

    #[error("Disposal not found: {0}")]
    NotFound(String),

    #[error("Disposal already claimed: {0}")]
    AlreadyClaimed(String),

    #[error(transparent)]
    User(#[from] UserError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for DisposalError {
    fn from(err: anyhow::Error) -> Self {
        DisposalError::Unknown(err.to_string())
    }
}

use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid password: {0}")]
    InvalidInput(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Incompatible hash version: expected {expected}, got {actual}")]
    IncompatibleVersion { expected: u32, actual: u32 },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

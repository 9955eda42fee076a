use argon2::Params;
use serde::Deserialize;
use serde::Serialize;

use super::errors::PasswordError;

const MIN_SALT_LENGTH: usize = 8;
const MAX_SALT_LENGTH: usize = 48;

// Bounds of a PHC-encodable key.
const MIN_KEY_LENGTH: usize = 10;
const MAX_KEY_LENGTH: usize = 64;

/// Argon2id cost parameters.
///
/// Defaults: 64 MiB of memory, 3 iterations, 2 lanes, 16-byte salt and
/// 32-byte derived key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
    /// Salt length in bytes
    pub salt_length: usize,
    /// Derived key length in bytes
    pub key_length: usize,
}

impl HashParams {
    /// Check the parameters and convert them into argon2 cost parameters.
    ///
    /// # Errors
    /// * `InvalidParams` - Costs, salt length or key length are out of range
    pub fn to_argon2(&self) -> Result<Params, PasswordError> {
        if !(MIN_SALT_LENGTH..=MAX_SALT_LENGTH).contains(&self.salt_length) {
            return Err(PasswordError::InvalidParams(format!(
                "salt length must be between {} and {} bytes, got {}",
                MIN_SALT_LENGTH, MAX_SALT_LENGTH, self.salt_length
            )));
        }
        if !(MIN_KEY_LENGTH..=MAX_KEY_LENGTH).contains(&self.key_length) {
            return Err(PasswordError::InvalidParams(format!(
                "key length must be between {} and {} bytes, got {}",
                MIN_KEY_LENGTH, MAX_KEY_LENGTH, self.key_length
            )));
        }

        Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(self.key_length),
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            parallelism: 2,
            salt_length: 16,
            key_length: 32,
        }
    }
}

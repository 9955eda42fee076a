use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::password_hash::Error as Argon2Error;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Version;

use super::encoding::parse_hash;
use super::errors::PasswordError;
use super::params::HashParams;

/// Longest accepted password, in bytes.
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Password hashing implementation.
///
/// Derives keys with Argon2id and stores them in a self-describing
/// `$argon2id$v=19$m=..,t=..,p=..$<salt>$<key>` string. Cost parameters are
/// validated once at construction and never change afterwards.
#[derive(Clone)]
pub struct PasswordHasher {
    params: HashParams,
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a password hasher with the given cost parameters.
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are rejected by Argon2
    pub fn new(params: HashParams) -> Result<Self, PasswordError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.to_argon2()?);
        Ok(Self { params, argon2 })
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Encoded hash string
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty or too long
    /// * `HashingFailed` - Salt generation or key derivation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        check_length(password)?;

        let mut salt = vec![0u8; self.params.salt_length];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        let salt = SaltString::encode_b64(&salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The key is re-derived with the parameters and salt stored in the hash,
    /// not with this hasher's own parameters, so older hashes stay verifiable
    /// after the configured costs change. Keys are compared in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored encoded hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty or too long
    /// * `MalformedHash` - Hash cannot be decoded
    /// * `IncompatibleVersion` - Hash was produced by another Argon2 version
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        check_length(password)?;

        let stored = parse_hash(hash)?;

        match self.argon2.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(Argon2Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        let params = HashParams::default();
        let argon2 = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            params.to_argon2().unwrap_or_default(),
        );
        Self { params, argon2 }
    }
}

fn check_length(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::InvalidInput("password is empty".to_string()));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::InvalidInput(format!(
            "password exceeds {} bytes",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

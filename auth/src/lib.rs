//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the ecobucks service:
//! - Password hashing (Argon2id, self-describing `$argon2id$v=19$...` strings)
//! - JWT access/refresh token generation and validation (HS256 only)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashParams, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(HashParams::default()).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, HashParams, TokenSettings};
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     HashParams::default(),
//!     TokenSettings::default(),
//! )
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate tokens
//! let tokens = auth.authenticate("password123", &hash, "user123", "alice").unwrap();
//!
//! // Validate token
//! let verified = auth.verify_access_token(&tokens.access_token).unwrap();
//! assert_eq!(verified.subject, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use authenticator::TokenSettings;
pub use authenticator::VerifiedToken;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenKind;
pub use password::HashParams;
pub use password::PasswordError;
pub use password::PasswordHasher;

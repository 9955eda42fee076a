use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenKind;
use crate::password::HashParams;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Token lifetimes applied at issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSettings {
    /// Access token lifetime; `None` issues tokens without `exp`
    pub access_lifetime: Option<Duration>,
    /// Refresh token lifetime
    pub refresh_lifetime: Duration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access_lifetime: Some(Duration::hours(24)),
            refresh_lifetime: Duration::days(30),
        }
    }
}

/// Authentication coordinator combining password verification and JWT generation.
///
/// Built once at startup from the signing secret and hashing parameters and
/// shared read-only afterwards.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_settings: TokenSettings,
    decoy_hash: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-never-issued";

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Claims of a token whose signature, algorithm, expiry and kind were checked.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken {
    pub subject: String,
    pub claims: Claims,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `hash_params` - Argon2id cost parameters for new hashes
    /// * `token_settings` - Token lifetimes
    ///
    /// # Errors
    /// * `Jwt(MissingSecret)` - Secret is empty
    /// * `Password(InvalidParams)` - Hashing parameters are invalid
    pub fn new(
        jwt_secret: &[u8],
        hash_params: HashParams,
        token_settings: TokenSettings,
    ) -> Result<Self, AuthenticationError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(hash_params)?,
            jwt_handler: JwtHandler::new(jwt_secret)?,
            token_settings,
            decoy_hash: OnceLock::new(),
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }


    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - User identifier to bind the tokens to
    /// * `username` - Username carried in the access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Password input or stored hash is invalid
    /// * `Jwt` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        username: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_tokens(subject, username)?)
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs a full verification against a decoy hash built with the
    /// configured costs, so the rejection takes as long as a wrong password.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let decoy = self.decoy_hash.get_or_init(|| {
            self.password_hasher
                .hash(DECOY_PASSWORD)
                .unwrap_or_default()
        });
        let _ = self.password_hasher.verify(password, decoy);

        AuthenticationError::InvalidCredentials
    }

    /// Issue an access/refresh pair without password verification.
    ///
    /// Used after registration and when renewing a session from a refresh
    /// token the caller has already verified.
    pub fn issue_tokens(&self, subject: &str, username: &str) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(subject, username)?,
            refresh_token: self.issue_refresh_token(subject)?,
        })
    }

    /// Issue an access token bound to `subject`.
    pub fn issue_access_token(&self, subject: &str, username: &str) -> Result<String, JwtError> {
        let claims = Claims::for_user(subject, username, self.token_settings.access_lifetime);
        self.jwt_handler.encode(&claims)
    }

    /// Issue a refresh token bound to `subject`.
    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, JwtError> {
        let claims = Claims::for_refresh(subject, self.token_settings.refresh_lifetime);
        self.jwt_handler.encode(&claims)
    }

    /// Validate an access token.
    ///
    /// # Errors
    /// * `WrongTokenKind` - A refresh token was presented
    /// * Any decoding error from [`JwtHandler::decode`]
    pub fn verify_access_token(&self, token: &str) -> Result<VerifiedToken, JwtError> {
        self.verify(token, TokenKind::Access)
    }

    /// Validate a refresh token.
    ///
    /// # Errors
    /// * `WrongTokenKind` - An access token was presented
    /// * Any decoding error from [`JwtHandler::decode`]
    pub fn verify_refresh_token(&self, token: &str) -> Result<VerifiedToken, JwtError> {
        self.verify(token, TokenKind::Refresh)
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<VerifiedToken, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.kind != expected {
            return Err(JwtError::WrongTokenKind {
                expected,
                actual: claims.kind,
            });
        }

        Ok(VerifiedToken {
            subject: claims.sub.clone(),
            claims,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        let params = HashParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
            ..HashParams::default()
        };
        Authenticator::new(SECRET, params, TokenSettings::default())
            .expect("Failed to create authenticator")
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let result = Authenticator::new(b"", HashParams::default(), TokenSettings::default());
        assert!(matches!(
            result,
            Err(AuthenticationError::Jwt(JwtError::MissingSecret))
        ));
    }

    #[test]
    fn test_invalid_hash_params_are_fatal() {
        let params = HashParams {
            parallelism: 0,
            ..HashParams::default()
        };
        let result = Authenticator::new(SECRET, params, TokenSettings::default());
        assert!(matches!(
            result,
            Err(AuthenticationError::Password(PasswordError::InvalidParams(_)))
        ));
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let tokens = authenticator
            .authenticate("my_password", &hash, "user123", "alice")
            .expect("Authentication failed");

        let verified = authenticator
            .verify_access_token(&tokens.access_token)
            .expect("Token validation failed");
        assert_eq!(verified.subject, "user123");
        assert_eq!(verified.claims.username(), Some("alice"));
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("my_password").unwrap();

        let result = authenticator.authenticate("wrong_password", &hash, "user123", "alice");
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_unknown_account_runs_decoy_verification() {
        let authenticator = authenticator();
        assert!(authenticator.decoy_hash.get().is_none());

        let rejection = authenticator.reject_unknown_account("any_password");
        assert_eq!(rejection, AuthenticationError::InvalidCredentials);

        let decoy = authenticator.decoy_hash.get().expect("Decoy hash not built");
        assert!(decoy.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));

        // built once and reused
        authenticator.reject_unknown_account("another_password");
        assert_eq!(authenticator.decoy_hash.get(), Some(decoy));
    }

    #[test]
    fn test_refresh_token_rejected_as_access_token() {
        let authenticator = authenticator();
        let tokens = authenticator.issue_tokens("user123", "alice").unwrap();

        let result = authenticator.verify_access_token(&tokens.refresh_token);
        assert_eq!(
            result,
            Err(JwtError::WrongTokenKind {
                expected: TokenKind::Access,
                actual: TokenKind::Refresh,
            })
        );
    }

    #[test]
    fn test_access_token_rejected_as_refresh_token() {
        let authenticator = authenticator();
        let tokens = authenticator.issue_tokens("user123", "alice").unwrap();

        let result = authenticator.verify_refresh_token(&tokens.access_token);
        assert!(matches!(result, Err(JwtError::WrongTokenKind { .. })));

        let verified = authenticator
            .verify_refresh_token(&tokens.refresh_token)
            .expect("Refresh token rejected");
        assert_eq!(verified.subject, "user123");
    }

    #[test]
    fn test_token_from_other_secret() {
        let other = Authenticator::new(
            b"another_secret_key_at_least_32_bytes",
            HashParams::default(),
            TokenSettings::default(),
        )
        .unwrap();
        let token = other.issue_access_token("user123", "alice").unwrap();

        let result = authenticator().verify_access_token(&token);
        assert_eq!(result, Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_non_expiring_access_token() {
        let settings = TokenSettings {
            access_lifetime: None,
            ..TokenSettings::default()
        };
        let authenticator = Authenticator::new(SECRET, HashParams::default(), settings).unwrap();
        let token = authenticator.issue_access_token("user123", "alice").unwrap();

        let verified = authenticator.verify_access_token(&token).unwrap();
        assert!(verified.claims.exp.is_none());
    }

    #[test]
    fn test_subjects_round_trip() {
        let authenticator = authenticator();
        for subject in ["a", "5f2b0d7e-8c1a-4b7e-9f53-1d2c3b4a5e6f", "user with spaces"] {
            let token = authenticator.issue_access_token(subject, "alice").unwrap();
            let verified = authenticator.verify_access_token(&token).unwrap();
            assert_eq!(verified.subject, subject);
        }
    }
}

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;

const EXPECTED_ALGORITHM: &str = "HS256";

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. Tokens are always signed with HS256 and
/// decoding refuses any other `alg` header value, `none` included.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is optional, but enforced without leeway when present
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `SigningFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// # Errors
    /// * `MalformedToken` - Token structure, encoding or claims are invalid
    /// * `UnexpectedAlgorithm` - Header names an algorithm other than HS256
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `TokenExpired` - `exp` claim is in the past
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        check_algorithm(token)?;

        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(JwtError::from)
    }
}

/// Inspect the raw header before any signature work so that a token
/// advertising `none` or an asymmetric scheme is rejected by name.
fn check_algorithm(token: &str) -> Result<(), JwtError> {
    let mut segments = token.split('.');
    let header = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(header), Some(_), Some(_), None) => header,
        _ => {
            return Err(JwtError::MalformedToken(
                "expected three dot-separated segments".to_string(),
            ))
        }
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| JwtError::MalformedToken(format!("invalid header encoding: {}", e)))?;
    let header: serde_json::Value = serde_json::from_slice(&header_bytes)
        .map_err(|e| JwtError::MalformedToken(format!("invalid header: {}", e)))?;

    match header.get("alg").and_then(|alg| alg.as_str()) {
        Some(EXPECTED_ALGORITHM) => Ok(()),
        Some(other) => Err(JwtError::UnexpectedAlgorithm(other.to_string())),
        None => Err(JwtError::MalformedToken("missing alg header".to_string())),
    }
}

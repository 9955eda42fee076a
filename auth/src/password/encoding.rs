use argon2::password_hash::PasswordHash;
use argon2::Algorithm;

use super::errors::PasswordError;

/// Argon2 version understood by this implementation (0x13).
pub const SUPPORTED_VERSION: u32 = 0x13;

const FIELD_COUNT: usize = 6;

const COST_PARAMS: [&str; 3] = ["m", "t", "p"];

/// Parse a stored `$argon2id$v=19$m=..,t=..,p=..$<salt>$<key>` string.
///
/// Stricter than [`PasswordHash::new`]: all six fields must be present, the
/// algorithm must be Argon2id and each of `m`, `t` and `p` must be given.
/// Salt and key use the PHC alphabet (unpadded standard base64).
///
/// # Errors
/// * `MalformedHash` - Wrong field count, algorithm, parameters or encoding
/// * `IncompatibleVersion` - Version is not 19
pub fn parse_hash(encoded: &str) -> Result<PasswordHash<'_>, PasswordError> {
    let fields = encoded.split('$').count();
    if fields != FIELD_COUNT || !encoded.starts_with('$') {
        return Err(malformed(format!(
            "expected {} fields, got {}",
            FIELD_COUNT, fields
        )));
    }

    let parsed = PasswordHash::new(encoded).map_err(|e| malformed(e.to_string()))?;

    if parsed.algorithm.as_str() != Algorithm::Argon2id.as_str() {
        return Err(malformed(format!(
            "unsupported algorithm '{}'",
            parsed.algorithm
        )));
    }

    let version = parsed
        .version
        .ok_or_else(|| malformed("missing version".to_string()))?;
    if version != SUPPORTED_VERSION {
        return Err(PasswordError::IncompatibleVersion {
            expected: SUPPORTED_VERSION,
            actual: version,
        });
    }

    for name in COST_PARAMS {
        if parsed.params.get_decimal(name).is_none() {
            return Err(malformed(format!("missing cost parameter '{}'", name)));
        }
    }

    if parsed.salt.is_none() || parsed.hash.is_none() {
        return Err(malformed("missing salt or key".to_string()));
    }

    Ok(parsed)
}

fn malformed(reason: String) -> PasswordError {
    PasswordError::MalformedHash(reason)
}

pub mod argon2;
pub mod encoding;
pub mod errors;
pub mod params;

pub use self::argon2::PasswordHasher;
pub use self::argon2::MAX_PASSWORD_LENGTH;
pub use errors::PasswordError;
pub use params::HashParams;

use std::env;

use auth::HashParams;
use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub hashing: HashParams,
    #[serde(default)]
    pub stations: StationsConfig,
}

/// Empty `url` selects the in-memory repositories.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    /// Access token lifetime; 0 disables expiry
    #[serde(default = "default_access_expiration_minutes")]
    pub access_expiration_minutes: i64,
    #[serde(default = "default_refresh_expiration_hours")]
    pub refresh_expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StationsConfig {
    pub ttl_seconds: u64,
}

impl Default for StationsConfig {
    fn default() -> Self {
        Self { ttl_seconds: 300 }
    }
}

fn default_access_expiration_minutes() -> i64 {
    60
}

fn default_refresh_expiration_hours() -> i64 {
    24 * 30
}

impl JwtConfig {
    pub fn token_settings(&self) -> TokenSettings {
        let access_lifetime = (self.access_expiration_minutes > 0)
            .then(|| chrono::Duration::minutes(self.access_expiration_minutes));

        TokenSettings {
            access_lifetime,
            refresh_lifetime: chrono::Duration::hours(self.refresh_expiration_hours),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations the service must not start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }
        if self.jwt.refresh_expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt.refresh_expiration_hours must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

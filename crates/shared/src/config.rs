use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared signing secret for session tokens. Required and non-empty;
    /// TokenService construction fails otherwise.
    pub jwt_secret: String,
    /// Session token lifetime in milliseconds
    #[serde(default = "default_token_ttl_ms")]
    pub token_ttl_ms: i64,
    /// Mark the session cookie Secure (enable behind HTTPS)
    #[serde(default)]
    pub secure_cookies: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_token_ttl_ms() -> i64 {
    86_400_000 // 24 hours
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from hotproperties.toml in the current directory,
    /// with environment variable overrides.
    /// Variables are prefixed with HOTPROPERTIES_ and use a double
    /// underscore between section and field, so that field names containing
    /// underscores survive the split.
    /// Example: HOTPROPERTIES_AUTH__JWT_SECRET, HOTPROPERTIES_SERVER__PORT
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("hotproperties").required(false))
            .add_source(
                config::Environment::with_prefix("HOTPROPERTIES")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}

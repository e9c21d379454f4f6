use serde::Deserialize;
use std::env;

/// Session cookies are signed; the key derivation requires this much secret
/// material.
pub const MIN_SESSION_SECRET_BYTES: usize = 64;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secret: String,
    #[serde(default = "default_cookie_max_age")]
    pub cookie_max_age_seconds: u64,
}

fn default_cookie_max_age() -> u64 {
    86_400
}

/// Admin panel credentials live in configuration, never in code.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub id: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),
    #[error("session.secret must be at least {MIN_SESSION_SECRET_BYTES} bytes, got {0}")]
    SessionSecretTooShort(usize),
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of WAYFARE)
            // Eg.. `WAYFARE__SERVER__PORT=8080` would set the server port
            .add_source(config::Environment::with_prefix("WAYFARE").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.session.secret.len() < MIN_SESSION_SECRET_BYTES {
            return Err(ConfigError::SessionSecretTooShort(self.session.secret.len()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> Config {
        Config {
            server: ServerConfig {
                port: 5000,
                static_dir: "wayfare-api/static".into(),
            },
            database: DatabaseConfig {
                url: "mongodb://127.0.0.1:27017".into(),
                name: "wayfare".into(),
            },
            session: SessionConfig {
                secret: secret.into(),
                cookie_max_age_seconds: default_cookie_max_age(),
            },
            admin: AdminConfig {
                id: "admin".into(),
                password: "password".into(),
            },
        }
    }

    #[test]
    fn short_session_secret_is_rejected() {
        let err = config_with_secret("too-short").validate().unwrap_err();
        assert!(matches!(err, ConfigError::SessionSecretTooShort(9)));
    }

    #[test]
    fn long_session_secret_passes() {
        let secret = "x".repeat(MIN_SESSION_SECRET_BYTES);
        assert!(config_with_secret(&secret).validate().is_ok());
    }
}

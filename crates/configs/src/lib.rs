//! # configs
//!
//! Layered settings for the board-comment service.
//!
//! Precedence, lowest first:
//! 1. built-in defaults
//! 2. optional TOML file (`config/default.toml`, or `BOARD_COMMENT_CONFIG`)
//! 3. environment, e.g. `BOARD_COMMENT_SERVER__PORT=9000`
//!
//! A `.env` file in the working directory is loaded into the environment
//! first.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

const ENV_PREFIX: &str = "BOARD_COMMENT";
const CONFIG_PATH_VAR: &str = "BOARD_COMMENT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/default";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub backend: DatabaseBackend,
    /// Connection string. Required for `postgres`.
    pub url: Option<SecretString>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives. `RUST_LOG` wins when set.
    pub filter: String,
    pub format: LogFormat,
}

impl Settings {
    /// Loads `.env`, the config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let builder = defaults()?
            .add_source(File::with_name(&path).required(false))
            .add_source(environment());
        Self::from_config(builder.build()?)
    }

    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }
        if self.database.backend == DatabaseBackend::Postgres {
            if !cfg!(feature = "db-postgres") {
                return Err(ConfigError::Invalid(
                    "database.backend = postgres needs the db-postgres feature".into(),
                ));
            }
            if self.database.url.is_none() {
                return Err(ConfigError::Invalid(
                    "database.url is required for the postgres backend".into(),
                ));
            }
        }
        Ok(())
    }
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.backend", "memory")?
        .set_default("database.max_connections", 10)?
        .set_default(
            "logging.filter",
            "board_comment=info,api_adapters=info,services=info,tower_http=info",
        )?
        .set_default("logging.format", "pretty")?)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn load_with(toml: &str, env: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<_, _>>();

        let config = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(environment().source(Some(vars)))
            .build()?;
        Settings::from_config(config)
    }

    #[test]
    fn defaults_select_memory_backend() {
        let settings = load_with("", &[]).unwrap();
        assert_eq!(settings.server.address(), "0.0.0.0:8080");
        assert_eq!(settings.database.backend, DatabaseBackend::Memory);
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert!(settings.database.url.is_none());
    }

    #[test]
    fn environment_overrides_file() {
        let settings = load_with(
            "[server]\nport = 9000\n[logging]\nformat = \"json\"\n",
            &[("BOARD_COMMENT_SERVER__PORT", "9100")],
        )
        .unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let err = load_with("[database]\nmax_connections = 0\n", &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn postgres_backend_needs_url() {
        let err = load_with("[database]\nbackend = \"postgres\"\n", &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[cfg(feature = "db-postgres")]
    #[test]
    fn database_url_is_kept_secret() {
        use secrecy::ExposeSecret;

        let settings = load_with(
            "[database]\nbackend = \"postgres\"\nurl = \"postgres://u:p@db/board\"\n",
            &[],
        )
        .unwrap();
        let url = settings.database.url.as_ref().unwrap();
        assert_eq!(url.expose_secret(), "postgres://u:p@db/board");
        assert!(!format!("{settings:?}").contains("u:p@db"));
    }
}

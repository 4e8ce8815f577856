//! Application settings loaded from environment variables.

use std::path::Path;

use serde::Serialize;

use super::constants::{
    DEFAULT_ENV_FILE, ENV_CACHE_ADDR, ENV_CACHE_KEEPTIME, ENV_PSQL_DBNAME, ENV_PSQL_HOST,
    ENV_PSQL_PASSWORD, ENV_PSQL_PORT, ENV_PSQL_SSLMODE, ENV_PSQL_USERNAME, ENV_SHEET_ADMINS,
    ENV_SHEET_DB, ENV_SHEET_MSG, ENV_TG_CHAT, ENV_TG_TOKEN,
};
use super::source::{DotenvFile, EnvSource, Layered, ProcessEnv};
use crate::errors::ConfigError;

/// Application configuration.
///
/// Built once at startup by [`ConfigLoader`] and read-only afterwards.
/// Fields are public plain data; nothing in the crate mutates a loaded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub postgres: PostgresConfig,
    pub tg: TgConfig,
    pub sheets: SheetsConfig,
    pub redis: RedisConfig,
}

/// Database credentials.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: String,
    pub username: String,
    pub db_name: String,
    pub ssl_mode: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl std::fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("db_name", &self.db_name)
            .field("ssl_mode", &self.ssl_mode)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Telegram bot credentials.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct TgConfig {
    #[serde(skip_serializing)]
    pub token: String,
    pub chat: i64,
}

impl std::fmt::Debug for TgConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TgConfig")
            .field("token", &"[REDACTED]")
            .field("chat", &self.chat)
            .finish()
    }
}

/// Spreadsheet identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetsConfig {
    pub db: String,
    pub msg: String,
    pub admins: String,
}

/// Cache endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedisConfig {
    pub addr: String,
    /// Cache entry lifetime in seconds
    pub keep_time: i64,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// With `use_local_file` set, `.env` in the working directory is layered
    /// under the environment first.
    pub fn load(use_local_file: bool) -> Result<Self, ConfigError> {
        Self::load_from(use_local_file, DEFAULT_ENV_FILE)
    }

    /// Same as [`Config::load`] with an explicit local file path.
    pub fn load_from(use_local_file: bool, env_file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::new(local_source(use_local_file, env_file.as_ref())?).load()
    }
}

/// Process environment, optionally backed by a local env file.
pub fn local_source(use_local_file: bool, env_file: &Path) -> Result<Box<dyn EnvSource>, ConfigError> {
    if !use_local_file {
        return Ok(Box::new(ProcessEnv));
    }

    let file = DotenvFile::from_path(env_file)?;
    if file.is_empty() {
        tracing::warn!(path = %file.path().display(), "Env file defines no variables");
    }
    tracing::info!(path = %file.path().display(), vars = file.len(), "Using local env file");
    Ok(Box::new(Layered::new(ProcessEnv, file)))
}

/// Reads a [`Config`] out of an [`EnvSource`].
pub struct ConfigLoader<S> {
    source: S,
    strict: bool,
}

impl<S: EnvSource> ConfigLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            strict: false,
        }
    }

    /// Reject absent or empty string variables instead of defaulting them to "".
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build the configuration.
    ///
    /// The two numeric variables are parsed first; a bad `TG_CHAT` fails
    /// without reading anything else.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let chat = self.int(ENV_TG_CHAT, ConfigError::chat)?;
        let keep_time = self.int(ENV_CACHE_KEEPTIME, ConfigError::keep_time)?;

        let config = Config {
            postgres: PostgresConfig {
                host: self.string(ENV_PSQL_HOST)?,
                port: self.string(ENV_PSQL_PORT)?,
                username: self.string(ENV_PSQL_USERNAME)?,
                db_name: self.string(ENV_PSQL_DBNAME)?,
                ssl_mode: self.string(ENV_PSQL_SSLMODE)?,
                password: self.string(ENV_PSQL_PASSWORD)?,
            },
            tg: TgConfig {
                token: self.string(ENV_TG_TOKEN)?,
                chat,
            },
            sheets: SheetsConfig {
                db: self.string(ENV_SHEET_DB)?,
                msg: self.string(ENV_SHEET_MSG)?,
                admins: self.string(ENV_SHEET_ADMINS)?,
            },
            redis: RedisConfig {
                addr: self.string(ENV_CACHE_ADDR)?,
                keep_time,
            },
        };

        tracing::debug!(?config, "Configuration assembled");
        Ok(config)
    }

    fn int(
        &self,
        key: &'static str,
        wrap: fn(String, std::num::ParseIntError) -> ConfigError,
    ) -> Result<i64, ConfigError> {
        // An unset variable parses as "" and fails like any other bad value
        let value = self.source.var(key).unwrap_or_default();
        value.parse::<i64>().map_err(|e| wrap(value, e))
    }

    fn string(&self, key: &'static str) -> Result<String, ConfigError> {
        match self.source.var(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ if self.strict => Err(ConfigError::Missing(key)),
            value => {
                tracing::warn!(var = key, "Environment variable unset or empty, using empty value");
                Ok(value.unwrap_or_default())
            }
        }
    }
}

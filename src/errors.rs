//! Centralized error handling.
//!
//! Every error carries a short stage label (`envVar load`, `chat`,
//! `keepTime`, `missing`, `ping`) at the start of its message.

use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use redis::RedisError;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("envVar load: {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("chat: invalid TG_CHAT value {value:?}: {source}")]
    Chat {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("keepTime: invalid CACHE_KEEPTIME value {value:?}: {source}")]
    KeepTime {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("missing: environment variable {0} is not set or empty")]
    Missing(&'static str),
}

impl ConfigError {
    pub fn chat(value: String, source: ParseIntError) -> Self {
        ConfigError::Chat { value, source }
    }

    pub fn keep_time(value: String, source: ParseIntError) -> Self {
        ConfigError::KeepTime { value, source }
    }

    /// Stage label for log fields
    pub fn stage(&self) -> &'static str {
        match self {
            ConfigError::EnvFile { .. } => "envVar load",
            ConfigError::Chat { .. } => "chat",
            ConfigError::KeepTime { .. } => "keepTime",
            ConfigError::Missing(_) => "missing",
        }
    }
}

/// Cache connection errors, all reported at the ping stage
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("ping: {addr}: {source}")]
    Ping {
        addr: String,
        #[source]
        source: RedisError,
    },

    #[error("ping: {addr}: no reply within {timeout:?}")]
    Timeout { addr: String, timeout: Duration },

    #[error("ping: {addr}: cancelled")]
    Cancelled { addr: String },

    #[error("ping: {addr}: unexpected reply {reply:?}")]
    UnexpectedReply { addr: String, reply: String },
}

impl CacheError {
    pub fn ping(addr: impl Into<String>, source: RedisError) -> Self {
        CacheError::Ping {
            addr: addr.into(),
            source,
        }
    }
}

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

//! Application configuration module
//!
//! Reads settings from environment variables, optionally backed by a local
//! `.env` file.

mod constants;
mod settings;
pub mod source;

pub use constants::*;
pub use settings::{
    local_source, Config, ConfigLoader, PostgresConfig, RedisConfig, SheetsConfig, TgConfig,
};
pub use source::{DotenvFile, EnvSource, Layered, ProcessEnv};

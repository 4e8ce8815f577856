//! Bot Bootstrap - startup configuration and cache connection
//!
//! Loads the typed settings for the bot (Postgres, Telegram, Google Sheets,
//! Redis) from environment variables and opens the Redis cache connection.
//!
//! # Modules
//!
//! - **cli**: Command-line interface
//! - **config**: Settings, environment sources and constants
//! - **infra**: Redis cache connection
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Containerized run, environment already populated
//! cargo run
//!
//! # Local run, fill gaps from ./.env
//! cargo run -- --test
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod infra;

// Re-export commonly used types at crate root
pub use config::{Config, ConfigLoader};
pub use errors::{AppError, AppResult, CacheError, ConfigError};
pub use infra::{Cache, PingContext};

//! Configuration constants
//!
//! Environment variable names and defaults in one place.

// =============================================================================
// Postgres
// =============================================================================

pub const ENV_PSQL_HOST: &str = "PSQL_HOST";
pub const ENV_PSQL_PORT: &str = "PSQL_PORT";
pub const ENV_PSQL_USERNAME: &str = "PSQL_USERNAME";
pub const ENV_PSQL_DBNAME: &str = "PSQL_DBNAME";
pub const ENV_PSQL_SSLMODE: &str = "PSQL_SSLMODE";
pub const ENV_PSQL_PASSWORD: &str = "PSQL_PASSWORD";

// =============================================================================
// Telegram
// =============================================================================

pub const ENV_TG_TOKEN: &str = "TG_TOKEN";

/// Numeric chat identifier, parsed as a base-10 `i64`
pub const ENV_TG_CHAT: &str = "TG_CHAT";

// =============================================================================
// Google Sheets
// =============================================================================

pub const ENV_SHEET_DB: &str = "SHEET_DB";
pub const ENV_SHEET_MSG: &str = "SHEET_MSG";
pub const ENV_SHEET_ADMINS: &str = "SHEET_ADMINS";

// =============================================================================
// Cache (Redis)
// =============================================================================

/// Cache server address in `host:port` form
pub const ENV_CACHE_ADDR: &str = "CACHE_ADDR";

/// Cache entry lifetime in seconds, parsed as a base-10 `i64`
pub const ENV_CACHE_KEEPTIME: &str = "CACHE_KEEPTIME";

/// Default deadline for the startup ping, in seconds
pub const DEFAULT_CACHE_PING_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// Local file preload
// =============================================================================

/// Local env file read in test/local mode
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Every string variable the loader reads, in load order
pub const REQUIRED_STRING_VARS: &[&str] = &[
    ENV_PSQL_HOST,
    ENV_PSQL_PORT,
    ENV_PSQL_USERNAME,
    ENV_PSQL_DBNAME,
    ENV_PSQL_SSLMODE,
    ENV_PSQL_PASSWORD,
    ENV_TG_TOKEN,
    ENV_SHEET_DB,
    ENV_SHEET_MSG,
    ENV_SHEET_ADMINS,
    ENV_CACHE_ADDR,
];

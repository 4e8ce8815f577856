//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{DEFAULT_CACHE_PING_TIMEOUT_SECS, DEFAULT_ENV_FILE};

/// Load bot configuration and check the cache server is reachable
#[derive(Parser, Debug)]
#[command(name = "bot-bootstrap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Local/test run: fill unset variables from the env file (off for docker)
    #[arg(long)]
    pub test: bool,

    /// Env file read in test mode
    #[arg(long, default_value = DEFAULT_ENV_FILE, env = "ENV_FILE")]
    pub env_file: PathBuf,

    /// Fail when a string variable is unset or empty
    #[arg(long)]
    pub strict: bool,

    /// Deadline for the cache ping, in seconds
    #[arg(long, default_value_t = DEFAULT_CACHE_PING_TIMEOUT_SECS, env = "CACHE_PING_TIMEOUT")]
    pub cache_timeout: u64,

    /// Print the loaded configuration as JSON (secrets omitted)
    #[arg(long)]
    pub print_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn cache_timeout(&self) -> Duration {
        Duration::from_secs(self.cache_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["bot-bootstrap"]).unwrap();

        assert!(!cli.test);
        assert!(!cli.strict);
        assert!(!cli.print_config);
        assert_eq!(cli.env_file, PathBuf::from(".env"));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "bot-bootstrap",
            "--test",
            "--strict",
            "--env-file",
            "local.env",
            "--cache-timeout",
            "2",
        ])
        .unwrap();

        assert!(cli.test);
        assert!(cli.strict);
        assert_eq!(cli.env_file, PathBuf::from("local.env"));
        assert_eq!(cli.cache_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_rejects_bad_timeout() {
        assert!(Cli::try_parse_from(["bot-bootstrap", "--cache-timeout", "soon"]).is_err());
    }
}

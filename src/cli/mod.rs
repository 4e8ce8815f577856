//! CLI module - Command-line interface for the bootstrap binary.

pub mod args;

pub use args::Cli;

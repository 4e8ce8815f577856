//! Infrastructure layer - external services.

mod cache;

pub use cache::{Cache, PingContext};

//! Redis cache connection.
//!
//! Opens one multiplexed connection to the cache server and confirms it answers
//! a single `PING` before handing it out.

use std::time::Duration;

use redis::{aio::MultiplexedConnection, Client};
use tokio_util::sync::CancellationToken;

use crate::config::DEFAULT_CACHE_PING_TIMEOUT_SECS;
use crate::errors::CacheError;

/// Bounds the startup ping: a deadline plus a cancellation token.
#[derive(Debug, Clone)]
pub struct PingContext {
    cancel: CancellationToken,
    timeout: Duration,
}

impl PingContext {
    pub fn new(timeout: Duration) -> Self {
        Self::with_cancel(CancellationToken::new(), timeout)
    }

    /// Tie the ping to an existing token, e.g. one cancelled on shutdown.
    pub fn with_cancel(cancel: CancellationToken, timeout: Duration) -> Self {
        Self { cancel, timeout }
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for PingContext {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_PING_TIMEOUT_SECS))
    }
}

/// Live connection to the cache server.
///
/// Cloning is cheap and every clone shares the same multiplexed connection.
#[derive(Clone)]
pub struct Cache {
    connection: MultiplexedConnection,
    addr: String,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").field("addr", &self.addr).finish()
    }
}

impl Cache {
    /// Connect to the cache server at `addr` (`host:port`) and ping it once.
    ///
    /// The client uses default options: no authentication, logical
    /// database 0. Exactly one connection attempt is made, so a refused
    /// connection is reported at once. Connect and ping together are
    /// bounded by `ctx`; there is no retry on failure.
    pub async fn connect(addr: &str, ctx: &PingContext) -> Result<Self, CacheError> {
        let attempt = async {
            let client =
                Client::open(format!("redis://{}", addr)).map_err(|e| CacheError::ping(addr, e))?;
            let mut connection = client
                .get_multiplexed_async_connection()
                .await
                .map_err(|e| CacheError::ping(addr, e))?;

            ping(&mut connection, addr).await?;

            Ok::<_, CacheError>(Self {
                connection,
                addr: addr.to_string(),
            })
        };

        let result = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => Err(CacheError::Cancelled {
                addr: addr.to_string(),
            }),
            result = tokio::time::timeout(ctx.timeout, attempt) => {
                result.unwrap_or_else(|_| {
                    Err(CacheError::Timeout {
                        addr: addr.to_string(),
                        timeout: ctx.timeout,
                    })
                })
            }
        };

        match &result {
            Ok(_) => tracing::info!(addr = %addr, "Redis cache connected"),
            Err(e) => tracing::warn!(addr = %addr, error = %e, "Redis cache unavailable"),
        }

        result
    }

    /// Get the shared connection for direct Redis operations.
    pub fn connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }

    /// Address this handle was opened against.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Check the server still answers.
    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        ping(&mut connection, &self.addr).await
    }
}

async fn ping(connection: &mut MultiplexedConnection, addr: &str) -> Result<(), CacheError> {
    let reply: String = redis::cmd("PING")
        .query_async(connection)
        .await
        .map_err(|e| CacheError::ping(addr, e))?;

    if reply != "PONG" {
        return Err(CacheError::UnexpectedReply {
            addr: addr.to_string(),
            reply,
        });
    }

    tracing::debug!(addr = %addr, "Redis ping ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = PingContext::default();
        assert_eq!(ctx.timeout(), Duration::from_secs(5));
        assert!(!ctx.cancel_token().is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_context() {
        let ctx = PingContext::new(Duration::from_secs(5));
        ctx.cancel_token().cancel();

        let err = Cache::connect("127.0.0.1:6379", &ctx).await.unwrap_err();

        assert!(matches!(err, CacheError::Cancelled { .. }));
        assert!(err.to_string().starts_with("ping"));
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let ctx = PingContext::new(Duration::from_secs(1));

        let err = Cache::connect("bad host:6379", &ctx).await.unwrap_err();

        assert!(matches!(err, CacheError::Ping { .. }));
        assert!(err.to_string().starts_with("ping: bad host:6379"));
    }

    #[tokio::test]
    async fn test_closed_port_fails_without_waiting_for_deadline() {
        let ctx = PingContext::new(Duration::from_secs(10));

        let started = std::time::Instant::now();
        let err = Cache::connect("127.0.0.1:1", &ctx).await.unwrap_err();

        assert!(matches!(err, CacheError::Ping { .. }), "got {err}");
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}

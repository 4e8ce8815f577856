//! Bot Bootstrap - Application entry point
//!
//! Loads configuration, then checks the cache server answers.

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bot_bootstrap::{
    cli::Cli,
    config::{local_source, ConfigLoader},
    AppResult, Cache, PingContext,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!("Startup failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let source = local_source(cli.test, &cli.env_file)?;
    let config = ConfigLoader::new(source).strict(cli.strict).load()?;
    tracing::info!(
        chat = config.tg.chat,
        cache_addr = %config.redis.addr,
        keep_time = config.redis.keep_time,
        "Configuration loaded"
    );

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    // Ctrl-C cancels the ping instead of waiting out the deadline
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let ctx = PingContext::with_cancel(cancel, cli.cache_timeout());
    let cache = Cache::connect(&config.redis.addr, &ctx).await?;
    tracing::info!(addr = %cache.addr(), "Startup checks passed");

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}

//! Headless kindred agent.
//!
//! Loads `config.toml` (defaults if absent), registers the partner watcher
//! and the daily reminder, and runs until Ctrl-C. Notifications are written
//! to the log. The bearer token is taken from `KINDRED_TOKEN`.

use std::sync::Arc;

use kindred::notify::LogSink;
use kindred::{AppContext, KindredConfig, Scheduler, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kindred=info")),
        )
        .init();

    let config_path = std::env::args_os()
        .nth(1)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(KindredConfig::default_config_path);

    let config = if config_path.exists() {
        KindredConfig::from_file(&config_path)
            .map_err(|e| anyhow::anyhow!("cannot load {}: {e}", config_path.display()))?
    } else {
        tracing::info!("no config at {}, using defaults", config_path.display());
        KindredConfig::default()
    };

    let session = match std::env::var("KINDRED_TOKEN") {
        Ok(token) if !token.is_empty() => Session::with_token(token),
        _ => {
            tracing::warn!("KINDRED_TOKEN not set, requests will be unauthenticated");
            Session::default()
        }
    };

    let ctx = AppContext::from_config(config, session, Arc::new(LogSink))?;
    let backoff = kindred::scheduler::BackoffPolicy::from(&ctx.config.retry);
    let mut scheduler =
        Scheduler::new(Arc::clone(&ctx.clock), Arc::clone(&ctx.network)).with_backoff(backoff);
    kindred::workers::register_all(&mut scheduler, &ctx);

    tracing::info!("kindred-agent running");
    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down");
    scheduler.shutdown().await;
    Ok(())
}

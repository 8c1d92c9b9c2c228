//! letrades relay server binary.
//!
//! Serves the liveness probe and the chat relay endpoint.

use std::time::Duration;

use clap::Parser;
use letrades_api::config::ApiConfig;
use letrades_core::prompt::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use tracing::{info, warn};

/// CLI arguments for the relay server.
///
/// Unset options fall back to the environment (see [`ApiConfig::from_env`]).
#[derive(Parser, Debug)]
#[command(name = "letrades_api_server", about = "letrades chat relay server")]
struct Args {
    /// Address to listen on [default: `BIND_ADDR` or 127.0.0.1:3001].
    #[arg(long)]
    bind_addr: Option<String>,

    /// Anthropic API key [default: `ANTHROPIC_API_KEY` or `VITE_ANTHROPIC_API_KEY`].
    #[arg(long)]
    anthropic_api_key: Option<String>,

    /// Base URL of the completion API [default: `ANTHROPIC_BASE_URL` or the public API].
    #[arg(long)]
    anthropic_base_url: Option<String>,

    /// Model identifier sent upstream.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Output-token budget sent upstream.
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Timeout for each outbound completion call, in seconds.
    #[arg(long, default_value_t = 60)]
    upstream_timeout_secs: u64,
}

impl Args {
    /// Apply command-line overrides on top of the environment config.
    fn into_config(self, mut config: ApiConfig) -> ApiConfig {
        if let Some(bind_addr) = self.bind_addr {
            config.bind_addr = bind_addr;
        }
        if let Some(key) = self.anthropic_api_key.filter(|k| !k.is_empty()) {
            config.anthropic_api_key = Some(key);
        }
        if let Some(base_url) = self.anthropic_base_url {
            config.anthropic_base_url = base_url;
        }
        config.model = self.model;
        config.max_tokens = self.max_tokens;
        config.upstream_timeout = Duration::from_secs(self.upstream_timeout_secs);
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| {
                    tracing_subscriber::EnvFilter::try_new(
                        "info,letrades_api=debug,letrades_core=debug",
                    )
                })?,
        )
        .init();

    let args = Args::parse();

    let config = args.into_config(ApiConfig::from_env());
    if config.anthropic_api_key.is_none() {
        warn!("no Anthropic API key configured; chat requests will fail");
    }

    info!(
        bind_addr = %config.bind_addr,
        model = %config.model,
        max_tokens = config.max_tokens,
        "starting letrades_api_server"
    );

    let state = letrades_api::AppState::new(config.clone())?;
    let app = letrades_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}

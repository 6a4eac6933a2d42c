//! $TWATAIR token price service
//!
//! `serve` exposes the cached token metrics over HTTP, `watch` polls a running
//! instance and prints every update to the terminal.
use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;

use twatair_token_api::presenter::{TokenPresenter, TokenPresenterImpl};
use twatair_token_api::view::ConsoleTokenView;
use twatair_token_api::{create_router, AppConfig, ServiceContainer};

#[derive(Debug, Parser)]
#[command(name = "twatair-token-api", version, about = "$TWATAIR token price API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Poll a running API and print token updates
    Watch {
        /// Base URL of the API, e.g. http://127.0.0.1:3000/api
        #[arg(long)]
        api_base_url: Option<String>,
        /// Polling period in seconds
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    let container = ServiceContainer::new(config).context("Failed to build services")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(container).await,
        Command::Watch {
            api_base_url,
            interval_secs,
        } => watch(container, api_base_url, interval_secs).await,
    }
}

async fn serve(container: ServiceContainer) -> anyhow::Result<()> {
    info!("Starting $TWATAIR token API v{}", twatair_token_api::VERSION);

    let config = container.config();
    if container.server_cache().is_mock_mode() {
        warn!("Running in mock mode");
    }

    let app = create_router(container.token_interactor(), &config.cors_origin);

    let address = config.listen_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn watch(
    container: ServiceContainer,
    api_base_url: Option<String>,
    interval_secs: Option<u64>,
) -> anyhow::Result<()> {
    let config = container.config();
    let base_url = api_base_url.unwrap_or_else(|| config.api_base_url.clone());
    let interval = interval_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.poll_interval());

    info!("Watching {} every {}s", base_url, interval.as_secs());

    let cache = container.client_cache(&base_url);
    let presenter = Arc::new(TokenPresenterImpl::new(Arc::new(ConsoleTokenView)));

    presenter.show_api_status(cache.check_api_health().await);

    let subscription = {
        let presenter = presenter.clone();
        cache.subscribe(move |snapshot| presenter.show_snapshot(&snapshot), interval)
    };

    shutdown_signal().await;
    subscription.unsubscribe();

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Signal received, shutting down");
}

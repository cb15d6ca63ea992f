pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod scheduling;
pub mod services;
pub mod state;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
use cli::{Cli, Commands};
pub use config::Config;
use services::ShowQuery;
use state::SharedState;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_tracing(&config);

    let command = cli.command.unwrap_or(Commands::Serve);

    if matches!(command, Commands::Init) {
        let path = cli.config.unwrap_or_else(Config::default_config_path);
        if Config::create_default_if_missing(&path)? {
            println!("Created {}", path.display());
        } else {
            println!("{} already exists, leaving it untouched", path.display());
        }
        return Ok(());
    }

    config.validate()?;

    match command {
        Commands::Serve => run_server(config).await,

        Commands::Migrate => {
            db::Store::new(&config.general.database_path).await?;
            println!("Migrations applied to {}", config.general.database_path);
            Ok(())
        }

        Commands::Genres => cli::commands::cmd_list_genres(&SharedState::new(config).await?).await,

        Commands::Halls => cli::commands::cmd_list_halls(&SharedState::new(config).await?).await,

        Commands::Movies => cli::commands::cmd_list_movies(&SharedState::new(config).await?).await,

        Commands::Shows {
            title,
            genre,
            from,
            to,
        } => {
            let state = SharedState::new(config).await?;
            let query = ShowQuery {
                title,
                genre,
                from,
                to,
            };
            cli::commands::cmd_list_shows(&state, query).await
        }

        Commands::Init => Ok(()),
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.observability.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(
        "Marquee v{} starting HTTP server...",
        env!("CARGO_PKG_VERSION")
    );

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    let port = config.server.port;
    let shared = Arc::new(SharedState::new(config).await?);
    let api_state = api::create_app_state(shared, prometheus_handle);
    let app = api::router(api_state).await;

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, draining connections...");
}

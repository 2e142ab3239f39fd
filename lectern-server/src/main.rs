use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use lectern_config::{ConfigLoad, ConfigLoader};
use lectern_core::{application::AppUnitOfWork, database::PostgresDatabase};
use lectern_server::{AppState, create_app};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "lectern-server")]
#[command(about = "Authoring API for course content trees")]
struct Cli {
    /// Path to a lectern.toml file
    #[arg(short, long, env = "LECTERN_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config.clone() {
        loader = loader.with_config_path(path);
    }
    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }
    warnings.log();

    info!(
        content.max_attachment_bytes = config.content.max_attachment_bytes,
        content.max_request_bytes = config.content.max_request_bytes,
        content.allowed_mime_prefixes = ?config.content.allowed_mime_prefixes,
        "content limits in effect"
    );

    let unit_of_work = match config.database.url.as_deref() {
        Some(url) => {
            let postgres = PostgresDatabase::connect(
                url,
                config.database.max_connections,
            )
            .await
            .context("failed to connect to PostgreSQL")?;
            postgres
                .initialize_schema()
                .await
                .context("failed to apply database migrations")?;
            AppUnitOfWork::from_postgres(Arc::new(postgres))
                .map_err(anyhow::Error::msg)?
        }
        None => {
            warn!("dev mode: course trees are kept in memory and lost on exit");
            AppUnitOfWork::in_memory()
        }
    };

    let config = Arc::new(config);
    let state = AppState::new(Arc::new(unit_of_work), config.clone());
    let app = create_app(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Starting Lectern authoring server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}

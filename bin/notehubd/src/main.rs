//! `notehubd` — the notehub server binary.
//!
//! Usage:
//!   notehubd [-c <config.toml>] [--listen <addr>]
//!
//! Without `-c`, built-in defaults apply (data under `./data`, listen
//! on 0.0.0.0:3000).

mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use notehub_core::Module;
use tracing::info;

use config::ServerConfig;

/// Notehub server.
#[derive(Parser, Debug)]
#[command(name = "notehubd", about = "Notehub server")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Listen address (overrides the config file).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let mut server_config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path);
            ServerConfig::load(std::path::Path::new(path))?
        }
        None => ServerConfig::default(),
    };
    if let Some(listen) = cli.listen {
        server_config.server.listen = listen;
    }

    // Initialize storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let core_config = notehub_core::ServiceConfig {
        data_dir: Some(data_dir.clone()),
        listen: server_config.server.listen.clone(),
        ..Default::default()
    };

    let sql: Arc<dyn notehub_sql::SQLStore> = Arc::new(
        notehub_sql::SqliteStore::open(&core_config.resolve_sqlite_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );
    let blob: Arc<dyn notehub_blob::BlobStore> = Arc::new(
        notehub_blob::FileStore::open(&core_config.resolve_blob_dir())
            .map_err(|e| anyhow::anyhow!("failed to open blob store: {}", e))?,
    );

    // Initialize modules. The auth module provides the session
    // authenticator that gates the notes routes.
    let auth_config = auth::service::AuthConfig {
        cookie_name: server_config.session.cookie_name.clone(),
        session_ttl_secs: server_config.session.ttl_secs,
    };
    let auth_module = auth::AuthModule::new(Arc::clone(&sql), auth_config)?;
    info!("Auth module initialized");

    let notes_module = notes::NotesModule::new(
        Arc::clone(&sql),
        Arc::clone(&blob),
        auth_module.authenticator(),
    )?;
    info!("Notes module initialized");

    let module_routes = vec![
        (auth_module.name(), auth_module.routes()),
        (notes_module.name(), notes_module.routes()),
    ];

    // Build router.
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&server_config.server.listen).await?;
    info!("Notehub server listening on {}", server_config.server.listen);
    axum::serve(listener, app).await?;

    Ok(())
}

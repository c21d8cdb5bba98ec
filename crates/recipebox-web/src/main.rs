//! Recipebox server
//!
//! Opens (and if needed creates) the recipe database, then serves the web
//! front end until interrupted.

use clap::Parser;
use recipebox_core::logging_facility;
use recipebox_store::RecipeStore;
use recipebox_web::{router, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();
    logging_facility::init(config.log_format);

    if let Err(e) = run(config).await {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = RecipeStore::open(&config.store_config())?;
    let recipe_count = store.count()?;
    tracing::info!(
        recipe_count,
        path = %config.store_config().db_path().display(),
        "database initialized"
    );

    let app = router(AppState::new(store), &config.static_dir);

    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

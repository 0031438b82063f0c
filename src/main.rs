use festival_itinerary::{background, load_prefs, router, AppState, Config};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.prefs_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let prefs = load_prefs(&config.prefs_path).await;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        "itinerary source: {}, quotes source: {}",
        config.itinerary, config.quotes
    );

    let state = AppState::new(config, prefs);
    background::spawn_rotation(state.clone());
    let app = router(state);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

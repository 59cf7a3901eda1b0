//! Awaji Life Board API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use awaji_api::config::AppConfig;
use awaji_api::routes;
use awaji_api::session::GameSession;
use awaji_api::state::AppState;
use awaji_board::{FileStorySource, StoryText};
use awaji_core::clock::SystemClock;
use awaji_core::rng::StdRngSource;
use awaji_progression::application::engine::Engine;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Awaji Life Board API server");

    let config = AppConfig::from_env()?;

    // The board starts with placeholder labels; story text is swapped in
    // once it has loaded.
    let engine = Engine::new(
        StoryText::default(),
        config.engine,
        Arc::new(SystemClock),
        Box::new(StdRngSource::from_os_rng()),
    );
    let session = GameSession::new(engine);
    if let Some(path) = &config.story_path {
        tracing::info!(path = %path.display(), "loading story text");
        session.spawn_story_load(Arc::new(FileStorySource::new(path)));
    }

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::app_router(AppState::new(session))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}

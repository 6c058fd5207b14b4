pub mod request_id;

use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::controllers::{
    health, playback::PlaybackController, speech::SpeechController, voices::VoiceController,
};
use crate::domain::take::TakeService;
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn build_router(
    take_service: Arc<TakeService>,
    voice_controller: Arc<VoiceController>,
    speech_controller: Arc<SpeechController>,
    playback_controller: Arc<PlaybackController>,
) -> Router {
    // Voice catalog
    let voice_routes = Router::new()
        .route("/api/voices", get(VoiceController::list_voices))
        .with_state(voice_controller);

    // Generation and export
    let speech_routes = Router::new()
        .route("/api/speech", post(SpeechController::generate))
        .route("/api/take", get(SpeechController::get_take))
        .route("/api/take/wav", get(SpeechController::download_wav))
        .with_state(speech_controller);

    // Transport
    let playback_routes = Router::new()
        .route("/api/playback", get(PlaybackController::get_status))
        .route("/api/playback/play", post(PlaybackController::play))
        .route("/api/playback/stop", post(PlaybackController::stop))
        .route("/api/playback/seek", post(PlaybackController::seek))
        .with_state(playback_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(take_service)
        .merge(voice_routes)
        .merge(speech_routes)
        .merge(playback_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Serve until Ctrl-C, then release the audio output
pub async fn start_http_server(
    config: Arc<Config>,
    take_service: Arc<TakeService>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    take_service.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

use pr_voice_backend::infrastructure::config::{Config, LogFormat};
use pr_voice_backend::infrastructure::http::{build_router, start_http_server};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting PR Voice Backend on {}:{}",
        config.host,
        config.port
    );
    if config.is_development() {
        tracing::warn!("Running in development mode");
    }

    // Create audio output
    let output = pr_voice_backend::infrastructure::audio::create_output(&config.audio_output)?;
    tracing::info!(audio_output = output.name(), "Audio output initialized");

    // Create Gemini speech client
    tracing::info!(
        model = %config.gemini_model,
        base_url = %config.gemini_base_url,
        timeout_secs = config.gemini_timeout_secs,
        "Initializing Gemini speech client"
    );
    let speech_repo = Arc::new(
        pr_voice_backend::infrastructure::repositories::GeminiSpeechRepository::new(
            config.gemini_base_url.clone(),
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            Duration::from_secs(config.gemini_timeout_secs),
        )?,
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let voice_repo = Arc::new(
        pr_voice_backend::infrastructure::repositories::HardcodedVoiceCatalogRepository::new(),
    );

    // 2. Instantiate services (inject repositories and output)
    tracing::info!("Instantiating services...");
    let voice_service = Arc::new(pr_voice_backend::domain::voice::VoiceService::new(voice_repo));
    let speech_service = Arc::new(pr_voice_backend::domain::speech::SpeechService::new(
        speech_repo,
    ));
    let take_service = Arc::new(pr_voice_backend::domain::take::TakeService::new(
        speech_service,
        voice_service.clone(),
        output,
        config.speech_sample_rate,
        config.speech_channels,
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let voice_controller = Arc::new(
        pr_voice_backend::controllers::voices::VoiceController::new(voice_service),
    );
    let speech_controller = Arc::new(
        pr_voice_backend::controllers::speech::SpeechController::new(take_service.clone()),
    );
    let playback_controller = Arc::new(
        pr_voice_backend::controllers::playback::PlaybackController::new(
            take_service.clone(),
            config.progress_interval_ms,
        ),
    );

    let app = build_router(
        take_service.clone(),
        voice_controller,
        speech_controller,
        playback_controller,
    );

    // Start HTTP server with all routes
    start_http_server(config, take_service, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pr_voice_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pr_voice_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

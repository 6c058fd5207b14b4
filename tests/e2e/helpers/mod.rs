use axum::Router;
use pr_voice_backend::infrastructure::config::{AudioOutputKind, Config, Environment, LogFormat};
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;
pub mod speech_stub;

use api_client::TestClient;
use speech_stub::StubSpeechRepository;

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub config: Config,
    pub speech: Arc<StubSpeechRepository>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            // Create test configuration
            let config = Config {
                host: "127.0.0.1".to_string(),
                port: 0, // Will be assigned by the OS
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
                gemini_api_key: "test-api-key".to_string(),
                gemini_model: "gemini-2.5-flash-preview-tts".to_string(),
                gemini_base_url: "http://127.0.0.1:9".to_string(),
                gemini_timeout_secs: 5,
                speech_sample_rate: 24_000,
                speech_channels: 1,
                audio_output: AudioOutputKind::Simulated,
                progress_interval_ms: 50,
            };

            let speech = Arc::new(StubSpeechRepository::new());

            // Create app with the stubbed speech API
            let app = create_app_with_stub_speech(&config, speech.clone());

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

            Self {
                client: TestClient::new(&base_url),
                config,
                speech,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Server task ends with the test runtime
        }
    }
}

fn create_app_with_stub_speech(config: &Config, speech: Arc<StubSpeechRepository>) -> Router {
    use pr_voice_backend::{
        controllers::{
            playback::PlaybackController, speech::SpeechController, voices::VoiceController,
        },
        domain::{speech::SpeechService, take::TakeService, voice::VoiceService},
        infrastructure::{
            audio::create_output, http::build_router,
            repositories::HardcodedVoiceCatalogRepository,
        },
    };

    let output = create_output(&config.audio_output).expect("Failed to create audio output");

    // Instantiate services
    let voice_service = Arc::new(VoiceService::new(Arc::new(
        HardcodedVoiceCatalogRepository::new(),
    )));
    let speech_service = Arc::new(SpeechService::new(speech));
    let take_service = Arc::new(TakeService::new(
        speech_service,
        voice_service.clone(),
        output,
        config.speech_sample_rate,
        config.speech_channels,
    ));

    // Instantiate controllers
    let voice_controller = Arc::new(VoiceController::new(voice_service));
    let speech_controller = Arc::new(SpeechController::new(take_service.clone()));
    let playback_controller = Arc::new(PlaybackController::new(
        take_service.clone(),
        config.progress_interval_ms,
    ));

    build_router(
        take_service,
        voice_controller,
        speech_controller,
        playback_controller,
    )
}

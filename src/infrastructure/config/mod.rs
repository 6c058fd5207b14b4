use crate::domain::audio::DEFAULT_SAMPLE_RATE;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Gemini speech API
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout_secs: u64,
    // PCM layout emitted by the speech model
    pub speech_sample_rate: u32,
    pub speech_channels: usize,
    // Playback
    pub audio_output: AudioOutputKind,
    pub progress_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AudioOutputKind {
    Simulated,
    Device,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            gemini_api_key: env::var("GEMINI_API_KEY")?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-preview-tts".to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            gemini_timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
            speech_sample_rate: env::var("SPEECH_SAMPLE_RATE")
                .unwrap_or_else(|_| DEFAULT_SAMPLE_RATE.to_string())
                .parse()?,
            speech_channels: env::var("SPEECH_CHANNELS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()?,
            audio_output: env::var("AUDIO_OUTPUT")
                .unwrap_or_else(|_| "simulated".to_string())
                .parse::<String>()
                .map(|s| match s.to_lowercase().as_str() {
                    "device" => AudioOutputKind::Device,
                    _ => AudioOutputKind::Simulated,
                })?,
            progress_interval_ms: env::var("PROGRESS_INTERVAL_MS")
                .unwrap_or_else(|_| "50".to_string())
                .parse()?,
        };

        if config.speech_sample_rate == 0 || config.speech_channels == 0 {
            return Err("SPEECH_SAMPLE_RATE and SPEECH_CHANNELS must be positive".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

pub mod gemini_speech_repository;
pub mod speech_repository;
pub mod voice_catalog_repository;

pub use gemini_speech_repository::GeminiSpeechRepository;
pub use speech_repository::SpeechRepository;
pub use voice_catalog_repository::HardcodedVoiceCatalogRepository;

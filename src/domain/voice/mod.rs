use serde::{Deserialize, Serialize};

/// Prebuilt voices of the speech API, serialized as the selector token it expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceType {
    Aoede,
    Kore,
    Puck,
    Charon,
    Fenrir,
    Zephyr,
}

impl VoiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceType::Aoede => "Aoede",
            VoiceType::Kore => "Kore",
            VoiceType::Puck => "Puck",
            VoiceType::Charon => "Charon",
            VoiceType::Fenrir => "Fenrir",
            VoiceType::Zephyr => "Zephyr",
        }
    }
}

impl std::fmt::Display for VoiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named persona: which prebuilt voice to use and how it should sound
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceProfile {
    pub id: String,
    pub label: String,
    pub description: String,
    pub voice: VoiceType,
    pub prompt_instruction: String,
}

/// Read-only access to the voice catalog
pub trait VoiceCatalogRepository: Send + Sync {
    /// All profiles in display order. Never empty.
    fn get_all_profiles(&self) -> Vec<VoiceProfile>;
    fn find_profile(&self, id: &str) -> Option<VoiceProfile>;
}

pub mod service;
pub use service::VoiceService;

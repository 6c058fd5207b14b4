use super::{VoiceCatalogRepository, VoiceProfile};
use std::sync::Arc;

pub struct VoiceService {
    repository: Arc<dyn VoiceCatalogRepository>,
}

impl VoiceService {
    pub fn new(repository: Arc<dyn VoiceCatalogRepository>) -> Self {
        Self { repository }
    }

    /// Returns every profile for display in the voice picker
    pub fn get_profiles(&self) -> Vec<VoiceProfile> {
        self.repository.get_all_profiles()
    }

    /// Look up a profile, falling back to the first catalog entry for unknown ids
    pub fn resolve_profile(&self, id: &str) -> Option<VoiceProfile> {
        if let Some(profile) = self.repository.find_profile(id) {
            return Some(profile);
        }

        tracing::warn!(
            voice_profile_id = %id,
            "Unknown voice profile requested, using default profile"
        );
        self.repository.get_all_profiles().into_iter().next()
    }
}

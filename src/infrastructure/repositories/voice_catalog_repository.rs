use crate::domain::voice::{VoiceCatalogRepository, VoiceProfile, VoiceType};
use std::collections::HashSet;
use std::sync::LazyLock;

static VOICE_PROFILES: LazyLock<Vec<VoiceProfile>> = LazyLock::new(|| {
    vec![
        VoiceProfile {
            id: "f_standard".to_string(),
            label: "ผู้หญิง (ทางการ)".to_string(),
            description: "เสียงชัดเจน เหมาะสำหรับประกาศทั่วไป".to_string(),
            voice: VoiceType::Kore,
            prompt_instruction: "Professional adult female, clear and formal tone.".to_string(),
        },
        VoiceProfile {
            id: "f_child".to_string(),
            label: "เด็ก (สดใส)".to_string(),
            description: "เสียงเด็กผู้หญิง ร่าเริง อ่อนโยน".to_string(),
            voice: VoiceType::Aoede,
            prompt_instruction: "Cheerful young child, gentle and innocent tone.".to_string(),
        },
        VoiceProfile {
            id: "f_teen".to_string(),
            label: "วัยรุ่นหญิง".to_string(),
            description: "เสียงวัยรุ่น ทันสมัย กระฉับกระเฉง".to_string(),
            voice: VoiceType::Kore,
            prompt_instruction: "Modern teenage female, energetic and friendly tone.".to_string(),
        },
        VoiceProfile {
            id: "m_professional".to_string(),
            label: "ผู้ชาย (ทางการ)".to_string(),
            description: "เสียงทุ้ม นุ่มลึก น่าเชื่อถือ".to_string(),
            voice: VoiceType::Puck,
            prompt_instruction: "Professional adult male, authoritative and reliable tone."
                .to_string(),
        },
        VoiceProfile {
            id: "m_senior".to_string(),
            label: "ผู้สูงอายุ (ชาย)".to_string(),
            description: "เสียงผู้ใหญ่อาวุโส ใจดี มีเมตตา".to_string(),
            voice: VoiceType::Charon,
            prompt_instruction: "Kind elderly male, slow and warm tone.".to_string(),
        },
        VoiceProfile {
            id: "m_teen".to_string(),
            label: "วัยรุ่นชาย".to_string(),
            description: "เสียงวัยรุ่นชาย ทันสมัย สดใส".to_string(),
            voice: VoiceType::Zephyr,
            prompt_instruction: "Youthful modern male, bright and casual tone.".to_string(),
        },
        VoiceProfile {
            id: "m_deep".to_string(),
            label: "ผู้ชาย (ทุ้มลึก)".to_string(),
            description: "เสียงทุ้มต่ำ มีพลัง อำนาจ".to_string(),
            voice: VoiceType::Fenrir,
            prompt_instruction: "Deep powerful male, commanding and strong tone.".to_string(),
        },
    ]
});

pub struct HardcodedVoiceCatalogRepository;

impl HardcodedVoiceCatalogRepository {
    pub fn new() -> Self {
        // Verify data integrity at construction time
        debug_assert!(!VOICE_PROFILES.is_empty(), "Catalog must not be empty");
        let ids: HashSet<&String> = VOICE_PROFILES.iter().map(|p| &p.id).collect();
        debug_assert_eq!(
            ids.len(),
            VOICE_PROFILES.len(),
            "Voice profile ids must be unique"
        );

        Self
    }
}

impl VoiceCatalogRepository for HardcodedVoiceCatalogRepository {
    fn get_all_profiles(&self) -> Vec<VoiceProfile> {
        VOICE_PROFILES.clone()
    }

    fn find_profile(&self, id: &str) -> Option<VoiceProfile> {
        VOICE_PROFILES.iter().find(|p| p.id == id).cloned()
    }
}

impl Default for HardcodedVoiceCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

//! Voice Context - 音色目录
//!
//! 30 个展示音色、情绪与语言列表

use serde::Serialize;

use super::{BaseVoice, Gender, VoiceError, VoiceOption};

/// 不附加风格提示的情绪
pub const NEUTRAL_EMOTION: &str = "Neutral";

/// 预置音色
pub static VOICES: [VoiceOption; 30] = [
    VoiceOption {
        id: "v1",
        name: "Sophia",
        gender: Gender::Female,
        base_voice: BaseVoice::Kore,
        description: "Clear and professional",
    },
    VoiceOption {
        id: "v2",
        name: "Emma",
        gender: Gender::Female,
        base_voice: BaseVoice::Kore,
        description: "Warm and friendly",
    },
    VoiceOption {
        id: "v3",
        name: "Olivia",
        gender: Gender::Female,
        base_voice: BaseVoice::Kore,
        description: "Energetic and bright",
    },
    VoiceOption {
        id: "v4",
        name: "Isabella",
        gender: Gender::Female,
        base_voice: BaseVoice::Zephyr,
        description: "Calm and soothing",
    },
    VoiceOption {
        id: "v5",
        name: "Mia",
        gender: Gender::Female,
        base_voice: BaseVoice::Zephyr,
        description: "Soft and gentle",
    },
    VoiceOption {
        id: "v6",
        name: "Ava",
        gender: Gender::Female,
        base_voice: BaseVoice::Zephyr,
        description: "Young and cheerful",
    },
    VoiceOption {
        id: "v7",
        name: "Luna",
        gender: Gender::Female,
        base_voice: BaseVoice::Kore,
        description: "Mysterious and deep",
    },
    VoiceOption {
        id: "v8",
        name: "Stella",
        gender: Gender::Female,
        base_voice: BaseVoice::Kore,
        description: "Confident and sharp",
    },
    VoiceOption {
        id: "v9",
        name: "Chloe",
        gender: Gender::Female,
        base_voice: BaseVoice::Zephyr,
        description: "Casual and upbeat",
    },
    VoiceOption {
        id: "v10",
        name: "Aria",
        gender: Gender::Female,
        base_voice: BaseVoice::Zephyr,
        description: "Melodic and expressive",
    },
    VoiceOption {
        id: "v11",
        name: "Zoe",
        gender: Gender::Female,
        base_voice: BaseVoice::Kore,
        description: "Smart and helpful",
    },
    VoiceOption {
        id: "v12",
        name: "Nora",
        gender: Gender::Female,
        base_voice: BaseVoice::Kore,
        description: "Wise and steady",
    },
    VoiceOption {
        id: "v13",
        name: "Lily",
        gender: Gender::Female,
        base_voice: BaseVoice::Zephyr,
        description: "Kind and patient",
    },
    VoiceOption {
        id: "v14",
        name: "Grace",
        gender: Gender::Female,
        base_voice: BaseVoice::Zephyr,
        description: "Elegant and smooth",
    },
    VoiceOption {
        id: "v15",
        name: "Mila",
        gender: Gender::Female,
        base_voice: BaseVoice::Kore,
        description: "Playful and fast",
    },
    VoiceOption {
        id: "v16",
        name: "Liam",
        gender: Gender::Male,
        base_voice: BaseVoice::Puck,
        description: "Standard and neutral",
    },
    VoiceOption {
        id: "v17",
        name: "Noah",
        gender: Gender::Male,
        base_voice: BaseVoice::Puck,
        description: "Strong and direct",
    },
    VoiceOption {
        id: "v18",
        name: "Oliver",
        gender: Gender::Male,
        base_voice: BaseVoice::Puck,
        description: "Academic and precise",
    },
    VoiceOption {
        id: "v19",
        name: "James",
        gender: Gender::Male,
        base_voice: BaseVoice::Charon,
        description: "Deep and resonant",
    },
    VoiceOption {
        id: "v20",
        name: "William",
        gender: Gender::Male,
        base_voice: BaseVoice::Charon,
        description: "Authoritative and bold",
    },
    VoiceOption {
        id: "v21",
        name: "Benjamin",
        gender: Gender::Male,
        base_voice: BaseVoice::Charon,
        description: "Rich and narrative",
    },
    VoiceOption {
        id: "v22",
        name: "Lucas",
        gender: Gender::Male,
        base_voice: BaseVoice::Fenrir,
        description: "Rugged and gritty",
    },
    VoiceOption {
        id: "v23",
        name: "Henry",
        gender: Gender::Male,
        base_voice: BaseVoice::Fenrir,
        description: "Classic and formal",
    },
    VoiceOption {
        id: "v24",
        name: "Theodore",
        gender: Gender::Male,
        base_voice: BaseVoice::Fenrir,
        description: "Elderly and wise",
    },
    VoiceOption {
        id: "v25",
        name: "Jack",
        gender: Gender::Male,
        base_voice: BaseVoice::Puck,
        description: "Friendly and boyish",
    },
    VoiceOption {
        id: "v26",
        name: "Leo",
        gender: Gender::Male,
        base_voice: BaseVoice::Puck,
        description: "Modern and fast",
    },
    VoiceOption {
        id: "v27",
        name: "Felix",
        gender: Gender::Male,
        base_voice: BaseVoice::Charon,
        description: "Serious and intense",
    },
    VoiceOption {
        id: "v28",
        name: "Sebastian",
        gender: Gender::Male,
        base_voice: BaseVoice::Charon,
        description: "Sophisticated",
    },
    VoiceOption {
        id: "v29",
        name: "Arthur",
        gender: Gender::Male,
        base_voice: BaseVoice::Fenrir,
        description: "Calm and steady",
    },
    VoiceOption {
        id: "v30",
        name: "Jasper",
        gender: Gender::Male,
        base_voice: BaseVoice::Fenrir,
        description: "Exciting and narrator-like",
    },];

/// 可选情绪
pub const EMOTIONS: [&str; 11] = [
    NEUTRAL_EMOTION,
    "Happy",
    "Sad",
    "Excited",
    "Calm",
    "Angry",
    "Whispering",
    "Shouting",
    "Inquisitive",
    "Terrified",
    "Sarcastic",
];

/// 语言选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// 可选语言
pub const LANGUAGES: [Language; 6] = [
    Language { code: "en-US", name: "English (US)" },
    Language { code: "en-GB", name: "English (UK)" },
    Language { code: "es-ES", name: "Spanish" },
    Language { code: "fr-FR", name: "French" },
    Language { code: "de-DE", name: "German" },
    Language { code: "ja-JP", name: "Japanese" },
];

/// 按 id（如 `v1`）或展示名称（不区分大小写）查找音色
pub fn find_voice(key: &str) -> Result<&'static VoiceOption, VoiceError> {
    VOICES
        .iter()
        .find(|v| v.id == key || v.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| VoiceError::NotFound(key.to_string()))
}

/// 按语言代码查找（不区分大小写）
pub fn find_language(code: &str) -> Result<&'static Language, VoiceError> {
    LANGUAGES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(code))
        .ok_or_else(|| VoiceError::UnknownLanguage(code.to_string()))
}

/// 规范化情绪名称，返回目录中的写法
pub fn find_emotion(emotion: &str) -> Result<&'static str, VoiceError> {
    EMOTIONS
        .iter()
        .copied()
        .find(|e| e.eq_ignore_ascii_case(emotion))
        .ok_or_else(|| VoiceError::UnknownEmotion(emotion.to_string()))
}

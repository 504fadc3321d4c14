//! Segment Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SegmentError;
use crate::domain::voice::{BaseVoice, NEUTRAL_EMOTION};

/// 片段唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentId(Uuid);

impl SegmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SegmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 生成参数
///
/// 一次批量运行内不可变，所有片段使用同一份快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// 基础音色
    pub voice: BaseVoice,
    /// 语速 (0.5 - 2.0)
    pub speed: f32,
    /// 音调 (0.5 - 2.0)
    pub pitch: f32,
    /// 情绪 / 风格
    pub emotion: String,
    /// 语言代码，如 `en-US`
    pub language: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            voice: BaseVoice::Kore,
            speed: 1.0,
            pitch: 1.0,
            emotion: NEUTRAL_EMOTION.to_string(),
            language: "en-US".to_string(),
        }
    }
}

impl GenerationSettings {
    pub fn validate(&self) -> Result<(), SegmentError> {
        if !(0.5..=2.0).contains(&self.speed) {
            return Err(SegmentError::InvalidSettings(
                "speed must be between 0.5 and 2.0".to_string(),
            ));
        }
        if !(0.5..=2.0).contains(&self.pitch) {
            return Err(SegmentError::InvalidSettings(
                "pitch must be between 0.5 and 2.0".to_string(),
            ));
        }
        if self.emotion.trim().is_empty() {
            return Err(SegmentError::InvalidSettings(
                "emotion cannot be empty".to_string(),
            ));
        }
        if self.language.trim().is_empty() {
            return Err(SegmentError::InvalidSettings(
                "language cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// 是否需要风格提示
    pub fn is_neutral(&self) -> bool {
        self.emotion.eq_ignore_ascii_case(NEUTRAL_EMOTION)
    }

    /// 试听用参数：沿用当前设置，替换音色并去掉情绪
    pub fn for_preview(&self, voice: BaseVoice) -> Self {
        Self {
            voice,
            emotion: NEUTRAL_EMOTION.to_string(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_valid() {
        let settings = GenerationSettings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.is_neutral());
    }

    #[test]
    fn test_speed_out_of_range() {
        let settings = GenerationSettings {
            speed: 3.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_pitch_out_of_range() {
        let settings = GenerationSettings {
            pitch: 0.1,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_language_rejected() {
        let settings = GenerationSettings {
            language: " ".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_preview_settings() {
        let settings = GenerationSettings {
            emotion: "Happy".to_string(),
            speed: 1.5,
            ..Default::default()
        };
        let preview = settings.for_preview(BaseVoice::Puck);

        assert_eq!(preview.voice, BaseVoice::Puck);
        assert!(preview.is_neutral());
        assert_eq!(preview.speed, 1.5);
    }
}

//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::VoiceError;

/// Gemini 预置基础音色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseVoice {
    Kore,
    Puck,
    Charon,
    Fenrir,
    Zephyr,
}

impl BaseVoice {
    /// API 使用的音色名
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kore => "Kore",
            Self::Puck => "Puck",
            Self::Charon => "Charon",
            Self::Fenrir => "Fenrir",
            Self::Zephyr => "Zephyr",
        }
    }
}

impl Default for BaseVoice {
    fn default() -> Self {
        Self::Kore
    }
}

impl FromStr for BaseVoice {
    type Err = VoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kore" => Ok(Self::Kore),
            "puck" => Ok(Self::Puck),
            "charon" => Ok(Self::Charon),
            "fenrir" => Ok(Self::Fenrir),
            "zephyr" => Ok(Self::Zephyr),
            _ => Err(VoiceError::UnknownBaseVoice(s.to_string())),
        }
    }
}

impl std::fmt::Display for BaseVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 音色性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_voice_parse_case_insensitive() {
        assert_eq!("charon".parse::<BaseVoice>(), Ok(BaseVoice::Charon));
        assert_eq!("ZEPHYR".parse::<BaseVoice>(), Ok(BaseVoice::Zephyr));
        assert!("Aoede".parse::<BaseVoice>().is_err());
    }

    #[test]
    fn test_base_voice_display() {
        assert_eq!(BaseVoice::Fenrir.to_string(), "Fenrir");
        assert_eq!(BaseVoice::default(), BaseVoice::Kore);
    }
}

//! Voice Context - 预置音色

use serde::Serialize;

use super::{BaseVoice, Gender};

/// 预置音色
///
/// 展示名称和描述只用于选择；合成时只使用 `base_voice`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoiceOption {
    pub id: &'static str,
    pub name: &'static str,
    pub gender: Gender,
    pub base_voice: BaseVoice,
    pub description: &'static str,
}

impl VoiceOption {
    /// 试听文本
    pub fn preview_text(&self) -> String {
        format!("Hello, I am {}.", self.name)
    }
}

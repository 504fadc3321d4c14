//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 预置音色目录（30 个展示音色映射到 5 个基础音色）
//! - 情绪 / 语言可选项
//! - 音色查询

mod aggregate;
mod catalog;
mod errors;
mod value_objects;

pub use aggregate::VoiceOption;
pub use catalog::{
    find_emotion, find_language, find_voice, Language, EMOTIONS, LANGUAGES, NEUTRAL_EMOTION, VOICES,
};
pub use errors::VoiceError;
pub use value_objects::{BaseVoice, Gender};

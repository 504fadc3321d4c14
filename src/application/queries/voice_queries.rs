//! Voice Queries

use crate::domain::segment::GenerationSettings;

/// 列出音色目录、情绪与语言
#[derive(Debug, Clone, Default)]
pub struct ListVoices;

/// 试听音色
#[derive(Debug, Clone)]
pub struct PreviewVoice {
    /// 音色 id 或展示名称
    pub voice: String,
    /// 当前生成参数（音色与情绪会被替换）
    pub settings: GenerationSettings,
}

//! Export Commands

/// 导出 ZIP：每个已完成片段一个 WAV
#[derive(Debug, Clone, Default)]
pub struct ExportZip {
    /// 指定文件名，None 时使用 `voice_generation_{millis}.zip`
    pub file_name: Option<String>,
}

/// 导出合并后的单个 WAV
#[derive(Debug, Clone, Default)]
pub struct ExportMerged {
    /// 指定文件名，None 时使用 `full_narration_{millis}.wav`
    pub file_name: Option<String>,
}

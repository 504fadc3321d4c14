//! Script Commands

use std::path::PathBuf;

/// 从文件导入脚本
#[derive(Debug, Clone)]
pub struct ImportScript {
    /// 按顺序拼接的脚本文件（.txt / .md / .srt）
    pub paths: Vec<PathBuf>,
}

/// 分割脚本，替换当前片段集合
#[derive(Debug, Clone)]
pub struct SplitScript {
    pub text: String,
    pub words_per_segment: usize,
}

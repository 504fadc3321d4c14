//! Audio Archiver Port - 批量打包抽象
//!
//! 把多个音频文件打包成一个归档，具体实现在 infrastructure/adapters 层

use thiserror::Error;

/// 打包错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Archive is empty")]
    Empty,

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Archive write error: {0}")]
    WriteError(String),
}

/// 归档条目
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// 归档内文件名
    pub file_name: String,
    /// 文件内容
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }
}

/// Audio Archiver Port
pub trait AudioArchiverPort: Send + Sync {
    /// 归档文件扩展名（不含点）
    fn extension(&self) -> &'static str;

    /// 按顺序打包条目
    fn archive(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError>;
}

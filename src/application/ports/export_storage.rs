//! Export Storage Port - 出站端口
//!
//! 定义导出文件（ZIP / 合并 WAV / 试听）的落盘接口

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 导出存储错误
#[derive(Debug, Error)]
pub enum ExportStorageError {
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Export Storage Port
#[async_trait]
pub trait ExportStoragePort: Send + Sync {
    /// 保存文件，返回最终路径
    async fn save(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, ExportStorageError>;
}

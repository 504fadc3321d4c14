//! File Storage - 文件系统导出存储实现
//!
//! 实现 ExportStoragePort trait

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::application::ports::{ExportStorageError, ExportStoragePort};

/// 文件系统导出存储
pub struct FileExportStorage {
    /// 输出目录
    base_dir: PathBuf,
}

impl FileExportStorage {
    /// 创建存储并确保输出目录存在
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, ExportStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| ExportStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取输出目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 只接受单层文件名，不允许跳出输出目录
    fn resolve(&self, file_name: &str) -> Result<PathBuf, ExportStorageError> {
        let mut components = Path::new(file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.base_dir.join(file_name)),
            _ => Err(ExportStorageError::InvalidFileName(file_name.to_string())),
        }
    }
}

#[async_trait]
impl ExportStoragePort for FileExportStorage {
    async fn save(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, ExportStorageError> {
        let path = self.resolve(file_name)?;

        fs::write(&path, data)
            .await
            .map_err(|e| ExportStorageError::IoError(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), size = data.len(), "Export file saved");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("nested").join("output");
        let storage = FileExportStorage::new(&out).await.unwrap();

        let path = storage.save("merged.wav", b"RIFF").await.unwrap();

        assert_eq!(path, out.join("merged.wav"));
        assert_eq!(fs::read(&path).await.unwrap(), b"RIFF");
    }

    #[tokio::test]
    async fn test_rejects_paths() {
        let temp_dir = tempdir().unwrap();
        let storage = FileExportStorage::new(temp_dir.path()).await.unwrap();

        for name in ["../escape.wav", "sub/dir.wav", "/abs.wav", "", ".."] {
            let result = storage.save(name, b"x").await;
            assert!(
                matches!(result, Err(ExportStorageError::InvalidFileName(_))),
                "{name} should be rejected"
            );
        }
    }
}

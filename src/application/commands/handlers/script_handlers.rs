//! Script Command Handlers

use std::path::Path;
use std::sync::Arc;

use crate::application::commands::{ImportScript, SplitScript};
use crate::application::error::ApplicationError;
use crate::application::ports::SegmentStorePort;
use crate::domain::segment::segment_script;
use crate::domain::{word_count, SegmentConfig};

/// 可导入的脚本扩展名
pub const SCRIPT_EXTENSIONS: &[&str] = &["txt", "md", "srt"];

/// 多个文件之间的分隔
const FILE_SEPARATOR: &str = "\n\n";

// ============================================================================
// ImportScript
// ============================================================================

/// ImportScript Handler - 读取并拼接脚本文件
#[derive(Debug, Default)]
pub struct ImportScriptHandler;

impl ImportScriptHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, command: ImportScript) -> Result<String, ApplicationError> {
        if command.paths.is_empty() {
            return Err(ApplicationError::validation("No script files given"));
        }

        let mut script = String::new();
        for path in &command.paths {
            if !is_script_file(path) {
                return Err(ApplicationError::validation(format!(
                    "Unsupported script file {}: expected .txt, .md or .srt",
                    path.display()
                )));
            }

            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                ApplicationError::StorageError(format!("{}: {}", path.display(), e))
            })?;

            if !script.is_empty() {
                script.push_str(FILE_SEPARATOR);
            }
            script.push_str(&content);

            tracing::debug!(path = %path.display(), bytes = content.len(), "Script file imported");
        }

        Ok(script)
    }
}

/// 按扩展名判断是否为脚本文件（不区分大小写）
pub fn is_script_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            SCRIPT_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

// ============================================================================
// SplitScript
// ============================================================================

/// 分段响应
#[derive(Debug, Clone)]
pub struct SplitScriptResponse {
    pub total_segments: usize,
    pub total_words: usize,
}

/// SplitScript Handler - 分段并替换片段集合
pub struct SplitScriptHandler {
    store: Arc<dyn SegmentStorePort>,
}

impl SplitScriptHandler {
    pub fn new(store: Arc<dyn SegmentStorePort>) -> Self {
        Self { store }
    }

    /// 空脚本不修改当前片段集合
    pub fn handle(&self, command: SplitScript) -> Result<SplitScriptResponse, ApplicationError> {
        if command.text.trim().is_empty() {
            return Err(ApplicationError::validation("Script is empty"));
        }

        let config = SegmentConfig::new(command.words_per_segment);
        let segments = segment_script(&command.text, &config);
        let total_segments = segments.len();
        let total_words = word_count(&command.text);

        self.store.replace_all(segments);

        tracing::info!(
            total_segments = total_segments,
            total_words = total_words,
            words_per_segment = command.words_per_segment,
            "Script split into segments"
        );

        Ok(SplitScriptResponse {
            total_segments,
            total_words,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemorySegmentStore;
    use bytes::Bytes;
    use std::path::PathBuf;

    #[test]
    fn test_is_script_file() {
        assert!(is_script_file(Path::new("a.txt")));
        assert!(is_script_file(Path::new("dir/b.MD")));
        assert!(is_script_file(Path::new("c.srt")));
        assert!(!is_script_file(Path::new("d.wav")));
        assert!(!is_script_file(Path::new("noext")));
    }

    #[tokio::test]
    async fn test_import_concatenates_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("one.txt");
        let second = dir.path().join("two.md");
        tokio::fs::write(&first, "first part").await.unwrap();
        tokio::fs::write(&second, "second part").await.unwrap();

        let script = ImportScriptHandler::new()
            .handle(ImportScript {
                paths: vec![first, second],
            })
            .await
            .unwrap();

        assert_eq!(script, "first part\n\nsecond part");
    }

    #[tokio::test]
    async fn test_import_rejects_unsupported_extension() {
        let result = ImportScriptHandler::new()
            .handle(ImportScript {
                paths: vec![PathBuf::from("voice.wav")],
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ImportScriptHandler::new()
            .handle(ImportScript {
                paths: vec![dir.path().join("missing.txt")],
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::StorageError(_))));
    }

    #[test]
    fn test_split_replaces_previous_segments() {
        let store = Arc::new(InMemorySegmentStore::new());
        let handler = SplitScriptHandler::new(store.clone());

        handler
            .handle(SplitScript {
                text: "a b c d".to_string(),
                words_per_segment: 2,
            })
            .unwrap();
        let old = store.list();
        store
            .replace(old[0].completed(Bytes::from_static(&[1, 2])))
            .unwrap();

        let response = handler
            .handle(SplitScript {
                text: "x y z".to_string(),
                words_per_segment: 2,
            })
            .unwrap();

        assert_eq!(response.total_segments, 2);
        assert_eq!(response.total_words, 3);
        let segments = store.list();
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| !s.is_completed()));
        assert!(store.get(old[0].id()).is_none());
    }

    #[test]
    fn test_split_empty_script_keeps_store() {
        let store = Arc::new(InMemorySegmentStore::new());
        let handler = SplitScriptHandler::new(store.clone());
        handler
            .handle(SplitScript {
                text: "keep me".to_string(),
                words_per_segment: 10,
            })
            .unwrap();

        let result = handler.handle(SplitScript {
            text: "   ".to_string(),
            words_per_segment: 10,
        });

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
    }
}

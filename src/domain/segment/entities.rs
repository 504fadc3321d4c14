//! Segment Context - Entities

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::SegmentId;
use crate::domain::text_segmenter::{split_into_segments, word_count, SegmentConfig};

/// 片段状态标签（不含数据，用于事件和列表）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentState {
    Idle,
    Processing,
    Completed,
    Failed,
}

impl SegmentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SegmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 片段状态
///
/// 音频只存在于 `Completed`，错误信息只存在于 `Failed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentStatus {
    Idle,
    Processing,
    /// 原始 PCM（s16le），导出时再封装为 WAV
    Completed { audio: Bytes },
    Failed { error: String },
}

impl SegmentStatus {
    pub fn state(&self) -> SegmentState {
        match self {
            Self::Idle => SegmentState::Idle,
            Self::Processing => SegmentState::Processing,
            Self::Completed { .. } => SegmentState::Completed,
            Self::Failed { .. } => SegmentState::Failed,
        }
    }
}

/// 合成片段
///
/// 状态只由批量编排器修改，每次修改都是整体替换
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    id: SegmentId,
    sequence_index: usize,
    name: String,
    text: String,
    status: SegmentStatus,
}

impl Segment {
    /// 创建 Idle 状态的片段
    pub fn new(sequence_index: usize, text: impl Into<String>) -> Self {
        Self {
            id: SegmentId::new(),
            sequence_index,
            name: format!("Segment {}", sequence_index + 1),
            text: text.into(),
            status: SegmentStatus::Idle,
        }
    }

    /// 标记为处理中
    pub fn processing(&self) -> Self {
        self.with_status(SegmentStatus::Processing)
    }

    /// 标记为完成并附加音频
    pub fn completed(&self, audio: Bytes) -> Self {
        self.with_status(SegmentStatus::Completed { audio })
    }

    /// 标记为失败并记录错误
    pub fn failed(&self, error: impl Into<String>) -> Self {
        self.with_status(SegmentStatus::Failed {
            error: error.into(),
        })
    }

    fn with_status(&self, status: SegmentStatus) -> Self {
        Self {
            id: self.id,
            sequence_index: self.sequence_index,
            name: self.name.clone(),
            text: self.text.clone(),
            status,
        }
    }

    /// 导出文件名：`Segment 1` → `segment_1.wav`
    pub fn file_name(&self) -> String {
        let stem = self
            .name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();
        format!("{}.wav", stem)
    }

    // Getters
    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }

    pub fn status(&self) -> &SegmentStatus {
        &self.status
    }

    pub fn state(&self) -> SegmentState {
        self.status.state()
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, SegmentStatus::Completed { .. })
    }

    pub fn audio_data(&self) -> Option<&Bytes> {
        match &self.status {
            SegmentStatus::Completed { audio } => Some(audio),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            SegmentStatus::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// 分割脚本并创建 Idle 片段
pub fn segment_script(text: &str, config: &SegmentConfig) -> Vec<Segment> {
    split_into_segments(text, config)
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| Segment::new(index, chunk))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_segment_is_idle() {
        let segment = Segment::new(0, "hello world");
        assert_eq!(segment.state(), SegmentState::Idle);
        assert_eq!(segment.name(), "Segment 1");
        assert!(segment.audio_data().is_none());
        assert!(segment.error_message().is_none());
        assert_eq!(segment.word_count(), 2);
    }

    #[test]
    fn test_transitions_keep_identity() {
        let segment = Segment::new(4, "text");
        let processing = segment.processing();
        assert_eq!(processing.id(), segment.id());
        assert_eq!(processing.sequence_index(), 4);
        assert_eq!(processing.state(), SegmentState::Processing);
        assert!(processing.audio_data().is_none());

        let done = processing.completed(Bytes::from_static(&[1, 2]));
        assert_eq!(done.audio_data().map(|b| b.as_ref()), Some(&[1u8, 2][..]));
        assert!(done.error_message().is_none());
        assert!(done.is_completed());

        let failed = processing.failed("boom");
        assert_eq!(failed.error_message(), Some("boom"));
        assert!(failed.audio_data().is_none());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(Segment::new(0, "x").file_name(), "segment_1.wav");
        assert_eq!(Segment::new(11, "x").file_name(), "segment_12.wav");
    }

    #[test]
    fn test_segment_script() {
        let segments = segment_script("a b c d e", &SegmentConfig::new(2));

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].text(), "e");
        assert_eq!(segments[2].sequence_index(), 2);
        assert_ne!(segments[0].id(), segments[1].id());
        assert!(segments.iter().all(|s| s.state() == SegmentState::Idle));
    }

    #[test]
    fn test_segment_script_empty() {
        assert!(segment_script("  ", &SegmentConfig::default()).is_empty());
    }
}

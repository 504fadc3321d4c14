//! Segment Queries

use crate::domain::segment::SegmentId;

/// 列出当前片段（按 sequence_index 排序）
#[derive(Debug, Clone, Default)]
pub struct ListSegments;

/// 获取单个已完成片段的 WAV
#[derive(Debug, Clone)]
pub struct GetSegmentAudio {
    pub segment_id: SegmentId,
}

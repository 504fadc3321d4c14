//! Segment Store Port - 片段集合管理
//!
//! 片段集合是唯一的共享可变状态，具体实现在 infrastructure/memory 层

use thiserror::Error;

use crate::domain::segment::{Segment, SegmentId};

/// Segment Store 错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Segment not found: {0}")]
    NotFound(SegmentId),
}

/// Segment Store Port
///
/// 所有修改都是按 id 的整体替换，不存在部分更新
pub trait SegmentStorePort: Send + Sync {
    /// 用新的片段集合替换全部内容（重新分段时丢弃旧音频）
    fn replace_all(&self, segments: Vec<Segment>);

    /// 按 id 整体替换一个片段，id 不存在时返回 NotFound
    fn replace(&self, segment: Segment) -> Result<(), StoreError>;

    /// 获取片段
    fn get(&self, id: SegmentId) -> Option<Segment>;

    /// 按 sequence_index 排序的全部片段
    fn list(&self) -> Vec<Segment>;

    /// 按 sequence_index 排序的已完成片段
    fn completed(&self) -> Vec<Segment> {
        self.list().into_iter().filter(|s| s.is_completed()).collect()
    }

    /// 清空
    fn clear(&self);

    /// 片段数量
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

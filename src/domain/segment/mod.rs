//! Segment Context - 合成片段限界上下文
//!
//! 职责:
//! - Segment 实体与状态机（Idle → Processing → Completed | Failed）
//! - 单次批量运行的生成参数快照
//! - 从脚本文本批量创建 Segment

mod entities;
mod errors;
mod value_objects;

pub use entities::{segment_script, Segment, SegmentState, SegmentStatus};
pub use errors::SegmentError;
pub use value_objects::{GenerationSettings, SegmentId};

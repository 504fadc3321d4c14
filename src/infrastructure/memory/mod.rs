//! Memory Layer - In-Memory State Management
//!
//! 实现 SegmentStore 和 PreviewCache，管理片段集合和试听缓存的内存状态

mod preview_cache;
mod segment_store;

pub use preview_cache::InMemoryPreviewCache;
pub use segment_store::InMemorySegmentStore;

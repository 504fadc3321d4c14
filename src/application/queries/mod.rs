//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：片段状态、单段音频、音色目录与试听

mod segment_queries;
mod voice_queries;

pub mod handlers;

pub use segment_queries::*;
pub use voice_queries::*;

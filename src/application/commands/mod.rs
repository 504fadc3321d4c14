//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：脚本导入/分段、批量导出

mod export_commands;
mod script_commands;

pub mod handlers;

pub use export_commands::*;
pub use script_commands::*;

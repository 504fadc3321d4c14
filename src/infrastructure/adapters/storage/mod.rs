//! Storage Adapter - 导出文件落盘

mod file_storage;

pub use file_storage::FileExportStorage;

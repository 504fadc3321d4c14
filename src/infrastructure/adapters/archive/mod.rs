//! Archive Adapter - 批量导出打包

mod zip_archiver;

pub use zip_archiver::ZipArchiver;

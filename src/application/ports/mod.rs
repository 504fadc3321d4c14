//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_archiver;
mod export_storage;
mod preview_cache;
mod segment_store;
mod tts_engine;

pub use audio_archiver::{ArchiveEntry, ArchiveError, AudioArchiverPort};
pub use export_storage::{ExportStorageError, ExportStoragePort};
pub use preview_cache::PreviewCachePort;
pub use segment_store::{SegmentStorePort, StoreError};
pub use tts_engine::{SynthesisRequest, TtsEnginePort, TtsError};

//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、SegmentStore、PreviewCache、导出等）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Script commands
    ImportScript,
    SplitScript,
    // Export commands
    ExportMerged,
    ExportZip,
    // Handlers
    handlers::{
        ExportMergedHandler, ExportResponse, ExportZipHandler, ImportScriptHandler,
        SplitScriptHandler, SplitScriptResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Export
    ArchiveEntry,
    ArchiveError,
    AudioArchiverPort,
    ExportStorageError,
    ExportStoragePort,
    // Preview cache
    PreviewCachePort,
    // Segment store
    SegmentStorePort,
    StoreError,
    // TTS engine
    SynthesisRequest,
    TtsEnginePort,
    TtsError,
};

pub use queries::{
    // Segment queries
    GetSegmentAudio,
    ListSegments,
    // Voice queries
    ListVoices,
    PreviewVoice,
    // Handlers
    handlers::{
        GetSegmentAudioHandler, ListSegmentsHandler, ListVoicesHandler, PreviewResponse,
        PreviewVoiceHandler, SegmentSummary, VoiceCatalog,
    },
};

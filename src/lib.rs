//! Scriptcast - 长文本 TTS 批量生成
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Segment Context: 脚本分段与片段状态
//! - Voice Context: 音色预设、情绪与语言目录
//! - Audio: WAV 容器封装与合并
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsEngine, SegmentStore, PreviewCache, ExportStorage, AudioArchiver）
//! - Commands: 脚本导入/分段、ZIP/合并导出
//! - Queries: 片段列表、单段音频、音色目录与试听
//!
//! 基础设施层 (infrastructure/):
//! - Memory: SegmentStore, PreviewCache 内存实现
//! - Worker: BatchOrchestrator 分组合成
//! - Adapters: Gemini / Fake TTS Client, 文件存储, ZIP 打包
//! - Events: 进程内事件广播

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};

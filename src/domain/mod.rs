//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Segment Context: 合成片段与生成参数
//! - Voice Context: 预置音色目录
//! - Audio Context: WAV 容器编码与拼接

pub mod audio;
pub mod segment;
pub mod voice;

// 共享的文本分割器
mod text_segmenter;

pub use text_segmenter::{
    split_into_segments, split_into_segments_default, word_count, SegmentConfig,
    DEFAULT_WORDS_PER_SEGMENT,
};

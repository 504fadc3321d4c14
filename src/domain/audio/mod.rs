//! Audio Context - 音频容器
//!
//! 职责:
//! - 原始 PCM → WAV 容器编码
//! - 同格式 WAV 容器拼接
//! - WAV 头解析

mod container;
mod errors;

pub use container::{AudioContainer, WavFormat, WavHeader, WAV_HEADER_LEN};
pub use errors::AudioError;

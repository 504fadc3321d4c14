//! TTS Engine Port - 语音合成能力抽象
//!
//! 定义文本 → 原始 PCM 的合成接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::domain::segment::GenerationSettings;

/// TTS 错误
///
/// 编排器对所有变体一视同仁：记录到片段上，不影响其他片段
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("API key is missing")]
    MissingCredentials,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("No audio data returned from the TTS service")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 合成请求
#[derive(Debug, Clone, Copy)]
pub struct SynthesisRequest<'a> {
    /// 要合成的文本
    pub text: &'a str,
    /// 本次运行的生成参数快照
    pub settings: &'a GenerationSettings,
}

impl<'a> SynthesisRequest<'a> {
    pub fn new(text: &'a str, settings: &'a GenerationSettings) -> Self {
        Self { text, settings }
    }
}

/// TTS Engine Port
///
/// 外部 TTS 服务的抽象接口，返回原始 PCM（24kHz 单声道 s16le）
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 合成一段文本
    async fn synthesize(&self, request: SynthesisRequest<'_>) -> Result<Bytes, TtsError>;
}

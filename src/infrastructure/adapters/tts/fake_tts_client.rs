//! Fake TTS Client - 用于演练和测试的 TTS 客户端
//!
//! 不调用外部服务，按词数生成确定性的正弦波 PCM

use async_trait::async_trait;
use bytes::{BufMut, Bytes, BytesMut};
use std::f32::consts::PI;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, TtsEnginePort, TtsError};
use crate::domain::word_count;

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 采样率
    pub sample_rate: u32,
    /// 每个词生成的时长（毫秒）
    pub ms_per_word: u32,
    /// 正弦波频率
    pub tone_hz: f32,
    /// 模拟推理延迟
    pub latency: Duration,
    /// 文本包含该标记时返回失败
    pub fail_marker: Option<String>,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            sample_rate: 24_000,
            ms_per_word: 80,
            tone_hz: 440.0,
            latency: Duration::from_millis(50),
            fail_marker: None,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(
            sample_rate = config.sample_rate,
            latency_ms = config.latency.as_millis() as u64,
            "FakeTtsClient initialized"
        );
        Self { config }
    }

    /// 单声道 s16le 正弦波
    fn tone(&self, words: usize) -> Bytes {
        let samples =
            self.config.sample_rate as usize * self.config.ms_per_word as usize * words.max(1) / 1000;
        let step = 2.0 * PI * self.config.tone_hz / self.config.sample_rate as f32;

        let mut pcm = BytesMut::with_capacity(samples * 2);
        for n in 0..samples {
            let sample = (step * n as f32).sin() * 0.25 * i16::MAX as f32;
            pcm.put_i16_le(sample as i16);
        }
        pcm.freeze()
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest<'_>) -> Result<Bytes, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.settings.voice,
            "FakeTtsClient: generating tone"
        );

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        if let Some(marker) = &self.config.fail_marker {
            if request.text.contains(marker.as_str()) {
                return Err(TtsError::ServiceError(format!(
                    "Fake failure: text contains {:?}",
                    marker
                )));
            }
        }

        Ok(self.tone(word_count(request.text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::segment::GenerationSettings;

    fn client(fail_marker: Option<&str>) -> FakeTtsClient {
        FakeTtsClient::new(FakeTtsClientConfig {
            latency: Duration::ZERO,
            fail_marker: fail_marker.map(str::to_string),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_length_scales_with_words() {
        let client = client(None);
        let settings = GenerationSettings::default();

        let one = client
            .synthesize(SynthesisRequest::new("hello", &settings))
            .await
            .unwrap();
        let three = client
            .synthesize(SynthesisRequest::new("hello there world", &settings))
            .await
            .unwrap();

        // 24000 Hz * 80 ms = 1920 samples = 3840 bytes
        assert_eq!(one.len(), 3840);
        assert_eq!(three.len(), 3 * 3840);
        assert_eq!(&three[..one.len()], &one[..]);
    }

    #[tokio::test]
    async fn test_fail_marker() {
        let client = client(Some("#fail"));
        let settings = GenerationSettings::default();

        let result = client
            .synthesize(SynthesisRequest::new("this one #fail s", &settings))
            .await;
        assert!(matches!(result, Err(TtsError::ServiceError(_))));
        assert!(client
            .synthesize(SynthesisRequest::new("fine", &settings))
            .await
            .is_ok());
    }
}

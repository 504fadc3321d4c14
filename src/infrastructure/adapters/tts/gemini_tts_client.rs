//! Gemini TTS Client - 调用 Gemini generateContent 接口
//!
//! 实现 TtsEnginePort trait
//!
//! POST {base_url}/v1beta/models/{model}:generateContent
//! Header: x-goog-api-key
//! Response: candidates[0].content.parts[0].inlineData.data (base64, 24kHz 单声道 s16le)

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, TtsEnginePort, TtsError};
use crate::domain::segment::GenerationSettings;

/// Gemini TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiTtsClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// 模型名
    pub model: String,
    /// API key，缺失时在首次合成时报错
    pub api_key: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GeminiTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash-preview-tts".to_string(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_modalities: [&'static str; 1],
    speech_config: SpeechConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    voice_config: VoiceConfig<'a>,
    language_code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig<'a> {
    voice_name: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
struct InlineData {
    data: Option<String>,
}

/// 情绪非 Neutral 时加上风格前缀
fn styled_prompt(text: &str, settings: &GenerationSettings) -> String {
    if settings.is_neutral() {
        text.to_string()
    } else {
        format!("Say {}: {}", settings.emotion, text)
    }
}

/// 构造请求体，prompt 已带风格前缀
fn build_request<'a>(
    prompt: &'a str,
    settings: &'a GenerationSettings,
) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: [Content {
            parts: [TextPart { text: prompt }],
        }],
        generation_config: GenerationConfig {
            response_modalities: ["AUDIO"],
            speech_config: SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: settings.voice.as_str(),
                    },
                },
                language_code: &settings.language,
            },
        },
    }
}

/// 取出第一个候选的第一段内联音频并解码
fn extract_audio(response: GenerateContentResponse) -> Result<Bytes, TtsError> {
    let data = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.inline_data)
        .and_then(|d| d.data)
        .filter(|d| !d.is_empty())
        .ok_or(TtsError::EmptyResponse)?;

    STANDARD
        .decode(data.as_bytes())
        .map(Bytes::from)
        .map_err(|e| TtsError::InvalidResponse(format!("Invalid base64 audio: {}", e)))
}

// ============================================================================
// Client
// ============================================================================

/// Gemini TTS 客户端
pub struct GeminiTtsClient {
    client: Client,
    config: GeminiTtsClientConfig,
}

impl GeminiTtsClient {
    pub fn new(config: GeminiTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        if config.api_key.is_none() {
            tracing::warn!("Gemini API key not configured, synthesis requests will fail");
        }

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TtsEnginePort for GeminiTtsClient {
    async fn synthesize(&self, request: SynthesisRequest<'_>) -> Result<Bytes, TtsError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(TtsError::MissingCredentials)?;
        let settings = request.settings;

        let prompt = styled_prompt(request.text, settings);
        let body = build_request(&prompt, settings);

        // speed / pitch 没有对应的 API 参数
        tracing::debug!(
            model = %self.config.model,
            voice = %settings.voice,
            language = %settings.language,
            emotion = %settings.emotion,
            speed = settings.speed,
            pitch = settings.pitch,
            text_len = request.text.len(),
            "Sending Gemini TTS request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to Gemini API: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TtsError::InvalidResponse(e.to_string()))?;
        let audio = extract_audio(payload)?;

        tracing::debug!(audio_size = audio.len(), "Gemini TTS request completed");
        Ok(audio)
    }
}

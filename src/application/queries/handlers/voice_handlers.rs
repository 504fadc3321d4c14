//! Voice Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{PreviewCachePort, SynthesisRequest, TtsEnginePort, TtsError};
use crate::application::queries::{ListVoices, PreviewVoice};
use crate::domain::audio::{AudioContainer, WavFormat};
use crate::domain::voice::{find_voice, Language, VoiceOption, EMOTIONS, LANGUAGES, VOICES};

/// 音色目录
#[derive(Debug, Clone, Serialize)]
pub struct VoiceCatalog {
    pub voices: &'static [VoiceOption],
    pub emotions: &'static [&'static str],
    pub languages: &'static [Language],
}

/// ListVoices Handler
#[derive(Debug, Default)]
pub struct ListVoicesHandler;

impl ListVoicesHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, _query: ListVoices) -> VoiceCatalog {
        VoiceCatalog {
            voices: &VOICES,
            emotions: &EMOTIONS,
            languages: &LANGUAGES,
        }
    }
}

/// 试听结果
#[derive(Debug, Clone)]
pub struct PreviewResponse {
    pub voice: &'static VoiceOption,
    pub audio: AudioContainer,
}

/// PreviewVoice Handler - 每个音色最多合成一次试听
pub struct PreviewVoiceHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
    cache: Arc<dyn PreviewCachePort>,
    format: WavFormat,
}

impl PreviewVoiceHandler {
    pub fn new(
        tts_engine: Arc<dyn TtsEnginePort>,
        cache: Arc<dyn PreviewCachePort>,
        format: WavFormat,
    ) -> Self {
        Self {
            tts_engine,
            cache,
            format,
        }
    }

    pub async fn handle(&self, query: PreviewVoice) -> Result<PreviewResponse, ApplicationError> {
        let voice = find_voice(&query.voice)?;

        if let Some(audio) = self.cache.get(voice.id) {
            tracing::debug!(voice_id = voice.id, "Preview cache hit");
            return Ok(PreviewResponse { voice, audio });
        }

        let settings = query.settings.for_preview(voice.base_voice);
        let text = voice.preview_text();
        let tts_engine = self.tts_engine.clone();
        let format = self.format;

        let init = Box::pin(async move {
            tracing::info!(
                voice_id = voice.id,
                base_voice = %voice.base_voice,
                "Synthesizing voice preview"
            );
            let pcm = tts_engine
                .synthesize(SynthesisRequest::new(&text, &settings))
                .await?;
            AudioContainer::encode(&pcm, format)
                .map_err(|e| TtsError::InvalidResponse(e.to_string()))
        });

        let audio = self
            .cache
            .get_or_try_insert(voice.id, init)
            .await
            .map_err(|e| {
                tracing::warn!(voice_id = voice.id, error = %e, "Voice preview failed");
                ApplicationError::from(e)
            })?;

        Ok(PreviewResponse { voice, audio })
    }
}

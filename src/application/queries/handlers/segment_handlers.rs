//! Segment Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SegmentStorePort;
use crate::application::queries::{GetSegmentAudio, ListSegments};
use crate::domain::audio::{AudioContainer, WavFormat};
use crate::domain::segment::{SegmentId, SegmentState};

/// 片段概要
#[derive(Debug, Clone, Serialize)]
pub struct SegmentSummary {
    pub id: SegmentId,
    pub sequence_index: usize,
    pub name: String,
    pub word_count: usize,
    pub state: SegmentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 原始 PCM 字节数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_bytes: Option<usize>,
}

/// ListSegments Handler
pub struct ListSegmentsHandler {
    store: Arc<dyn SegmentStorePort>,
}

impl ListSegmentsHandler {
    pub fn new(store: Arc<dyn SegmentStorePort>) -> Self {
        Self { store }
    }

    pub fn handle(&self, _query: ListSegments) -> Vec<SegmentSummary> {
        self.store
            .list()
            .into_iter()
            .map(|segment| SegmentSummary {
                id: segment.id(),
                sequence_index: segment.sequence_index(),
                name: segment.name().to_string(),
                word_count: segment.word_count(),
                state: segment.state(),
                error: segment.error_message().map(str::to_string),
                audio_bytes: segment.audio_data().map(|a| a.len()),
            })
            .collect()
    }
}

/// GetSegmentAudio Handler - 单段 WAV 下载
pub struct GetSegmentAudioHandler {
    store: Arc<dyn SegmentStorePort>,
    format: WavFormat,
}

impl GetSegmentAudioHandler {
    pub fn new(store: Arc<dyn SegmentStorePort>, format: WavFormat) -> Self {
        Self { store, format }
    }

    pub fn handle(&self, query: GetSegmentAudio) -> Result<AudioContainer, ApplicationError> {
        let segment = self
            .store
            .get(query.segment_id)
            .ok_or_else(|| ApplicationError::not_found("Segment", query.segment_id))?;

        let audio = segment.audio_data().ok_or_else(|| {
            ApplicationError::invalid_state(format!(
                "{} has no audio (state: {})",
                segment.name(),
                segment.state()
            ))
        })?;

        Ok(AudioContainer::encode(audio, self.format)?)
    }
}

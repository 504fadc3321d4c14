//! Export Command Handlers
//!
//! 已完成片段 → WAV 容器 → ZIP / 合并 WAV → 落盘

use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::{ExportMerged, ExportZip};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArchiveEntry, AudioArchiverPort, ExportStoragePort, SegmentStorePort,
};
use crate::domain::audio::{AudioContainer, WavFormat};
use crate::domain::segment::Segment;

/// 导出结果
#[derive(Debug, Clone)]
pub struct ExportResponse {
    pub path: PathBuf,
    pub segment_count: usize,
    pub size_bytes: usize,
}

/// 已完成片段封装为 WAV（按 sequence_index 顺序）
fn completed_containers(
    store: &dyn SegmentStorePort,
    format: WavFormat,
) -> Result<Vec<(Segment, AudioContainer)>, ApplicationError> {
    let mut completed = Vec::new();
    for segment in store.completed() {
        let Some(audio) = segment.audio_data() else {
            continue;
        };
        let container = AudioContainer::encode(audio, format)?;
        completed.push((segment, container));
    }

    if completed.is_empty() {
        return Err(ApplicationError::NothingToExport);
    }
    Ok(completed)
}

// ============================================================================
// ExportZip
// ============================================================================

/// ExportZip Handler
pub struct ExportZipHandler {
    store: Arc<dyn SegmentStorePort>,
    archiver: Arc<dyn AudioArchiverPort>,
    storage: Arc<dyn ExportStoragePort>,
    format: WavFormat,
}

impl ExportZipHandler {
    pub fn new(
        store: Arc<dyn SegmentStorePort>,
        archiver: Arc<dyn AudioArchiverPort>,
        storage: Arc<dyn ExportStoragePort>,
        format: WavFormat,
    ) -> Self {
        Self {
            store,
            archiver,
            storage,
            format,
        }
    }

    pub async fn handle(&self, command: ExportZip) -> Result<ExportResponse, ApplicationError> {
        let completed = completed_containers(self.store.as_ref(), self.format)?;

        let entries: Vec<ArchiveEntry> = completed
            .into_iter()
            .map(|(segment, container)| {
                ArchiveEntry::new(segment.file_name(), container.into_bytes())
            })
            .collect();
        let archive = self.archiver.archive(&entries)?;

        let file_name = command.file_name.unwrap_or_else(|| {
            format!(
                "voice_generation_{}.{}",
                Utc::now().timestamp_millis(),
                self.archiver.extension()
            )
        });
        let path = self.storage.save(&file_name, &archive).await?;

        tracing::info!(
            path = %path.display(),
            segment_count = entries.len(),
            size_bytes = archive.len(),
            "Archive exported"
        );

        Ok(ExportResponse {
            path,
            segment_count: entries.len(),
            size_bytes: archive.len(),
        })
    }
}

// ============================================================================
// ExportMerged
// ============================================================================

/// ExportMerged Handler
pub struct ExportMergedHandler {
    store: Arc<dyn SegmentStorePort>,
    storage: Arc<dyn ExportStoragePort>,
    format: WavFormat,
}

impl ExportMergedHandler {
    pub fn new(
        store: Arc<dyn SegmentStorePort>,
        storage: Arc<dyn ExportStoragePort>,
        format: WavFormat,
    ) -> Self {
        Self {
            store,
            storage,
            format,
        }
    }

    pub async fn handle(&self, command: ExportMerged) -> Result<ExportResponse, ApplicationError> {
        let containers: Vec<AudioContainer> = completed_containers(self.store.as_ref(), self.format)?
            .into_iter()
            .map(|(_, container)| container)
            .collect();
        let segment_count = containers.len();
        let merged = AudioContainer::merge_checked(&containers)?;

        let file_name = command
            .file_name
            .unwrap_or_else(|| format!("full_narration_{}.wav", Utc::now().timestamp_millis()));
        let path = self.storage.save(&file_name, merged.as_bytes()).await?;

        tracing::info!(
            path = %path.display(),
            segment_count = segment_count,
            duration_ms = ?merged.duration_ms(),
            "Merged audio exported"
        );

        Ok(ExportResponse {
            path,
            segment_count,
            size_bytes: merged.len(),
        })
    }
}

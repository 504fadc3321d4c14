//! Zip Archiver - 实现 AudioArchiverPort

use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::application::ports::{ArchiveEntry, ArchiveError, AudioArchiverPort};

/// ZIP 打包器（deflate）
#[derive(Debug, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }
}

impl AudioArchiverPort for ZipArchiver {
    fn extension(&self) -> &'static str {
        "zip"
    }

    fn archive(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
        if entries.is_empty() {
            return Err(ArchiveError::Empty);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        if let Some(dup) = entries.iter().find(|e| !seen.insert(e.file_name.as_str())) {
            return Err(ArchiveError::DuplicateEntry(dup.file_name.clone()));
        }

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in entries {
            writer
                .start_file(entry.file_name.as_str(), options)
                .map_err(|e| ArchiveError::WriteError(e.to_string()))?;
            writer
                .write_all(&entry.data)
                .map_err(|e| ArchiveError::WriteError(e.to_string()))?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| ArchiveError::WriteError(e.to_string()))?;

        tracing::debug!(entries = entries.len(), "Archive written");
        Ok(cursor.into_inner())
    }
}

use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;

use crate::errors::AcquisitionError;
use crate::file_utils::FileManager;
use crate::formats::parse_srt;
use crate::sources::SubtitleSource;
use crate::subtitle::Subtitle;
use crate::video_id::VideoId;

/// Reads pre-supplied subtitle files named `<videoId>.<ext>` from a directory
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    /// Directory holding the subtitle files
    dir: PathBuf,
    /// File extension, without the dot
    extension: String,
}

impl LocalFileSource {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    /// Path the file for `video_id` is expected at
    pub fn path_for(&self, video_id: &VideoId) -> PathBuf {
        FileManager::subtitle_path(&self.dir, video_id, &self.extension)
    }
}

#[async_trait]
impl SubtitleSource for LocalFileSource {
    fn name(&self) -> &'static str {
        "local file"
    }

    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<Subtitle>, AcquisitionError> {
        let path = self.path_for(video_id);

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            AcquisitionError::SourceUnavailable(format!("{}: {}", path.display(), e))
        })?;

        let entries = parse_srt(&content);
        debug!("Parsed {} entries from {}", entries.len(), path.display());

        Ok(entries)
    }
}

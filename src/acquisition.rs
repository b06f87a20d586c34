/*!
 * Subtitle acquisition orchestrator.
 *
 * Pre-supplied local files are authoritative and tried first. When they
 * yield nothing the configured remote source is tried, and whatever it
 * yields is returned. Every failure past identifier validation degrades
 * to an empty sequence; the error only shows up in the log.
 */

use log::{debug, info, warn};

use crate::app_config::{AcquisitionConfig, AcquisitionMode};
use crate::errors::AcquisitionError;
use crate::sources::{ExternalToolSource, LocalFileSource, ScrapeSource, SubtitleSource};
use crate::subtitle::{check_sequence, Subtitle};
use crate::video_id::VideoId;

/// Tries the local source, then one remote source
#[derive(Debug)]
pub struct SubtitleAcquirer {
    local: Box<dyn SubtitleSource>,
    remote: Box<dyn SubtitleSource>,
}

impl SubtitleAcquirer {
    pub fn new(local: Box<dyn SubtitleSource>, remote: Box<dyn SubtitleSource>) -> Self {
        Self { local, remote }
    }

    /// Build the orchestrator for the configured deployment mode
    pub fn from_config(config: &AcquisitionConfig) -> Self {
        let local = Box::new(LocalFileSource::new(
            config.subtitles_dir.clone(),
            config.subtitle_extension.clone(),
        ));

        let remote: Box<dyn SubtitleSource> = match config.mode {
            AcquisitionMode::Scrape => Box::new(ScrapeSource::from_config(config)),
            AcquisitionMode::ExternalTool => Box::new(ExternalToolSource::from_config(config)),
        };

        debug!("Acquisition mode: {}", config.mode.display_name());
        Self::new(local, remote)
    }

    /// Acquire subtitles for a raw identifier or URL.
    ///
    /// Never fails: an invalid identifier is logged and yields an empty
    /// sequence like any other miss.
    pub async fn acquire(&self, input: &str) -> Vec<Subtitle> {
        match self.try_acquire(input).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Rejected subtitle request: {}", e);
                Vec::new()
            }
        }
    }

    /// Acquire subtitles, surfacing only a rejected identifier.
    ///
    /// # Returns
    /// * `Ok(entries)` - Subtitles, empty when no source had any
    /// * `Err(InvalidInput)` - The input is not a video identifier; no source was touched
    pub async fn try_acquire(&self, input: &str) -> Result<Vec<Subtitle>, AcquisitionError> {
        let video_id = VideoId::from_input(input)?;
        Ok(self.acquire_id(&video_id).await)
    }

    /// Acquire subtitles for an already validated identifier
    pub async fn acquire_id(&self, video_id: &VideoId) -> Vec<Subtitle> {
        if let Some(entries) = self.fetch_from(self.local.as_ref(), video_id).await {
            if !entries.is_empty() {
                info!("Using {} local subtitle entries for {}", entries.len(), video_id);
                return entries;
            }
        }

        match self.fetch_from(self.remote.as_ref(), video_id).await {
            Some(entries) => {
                if entries.is_empty() {
                    info!("No subtitles found for {}", video_id);
                } else {
                    info!("Fetched {} subtitle entries for {} via {}", entries.len(), video_id, self.remote.name());
                }
                entries
            }
            None => Vec::new(),
        }
    }

    async fn fetch_from(&self, source: &dyn SubtitleSource, video_id: &VideoId) -> Option<Vec<Subtitle>> {
        match source.fetch(video_id).await {
            Ok(entries) => {
                let report = check_sequence(&entries);
                if !report.is_clean() {
                    warn!("Irregular subtitle sequence from {} for {}: {:?}", source.name(), video_id, report);
                }
                Some(entries)
            }
            Err(e @ AcquisitionError::SourceUnavailable(_)) => {
                debug!("{} has nothing for {}: {}", source.name(), video_id, e);
                None
            }
            Err(e) => {
                warn!("{} failed for {}: {}", source.name(), video_id, e);
                None
            }
        }
    }
}

/// One-shot acquisition with the given configuration
pub async fn acquire_subtitles(config: &AcquisitionConfig, input: &str) -> Vec<Subtitle> {
    SubtitleAcquirer::from_config(config).acquire(input).await
}

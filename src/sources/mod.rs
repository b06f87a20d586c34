/*!
 * Subtitle source implementations.
 *
 * Each source turns a video identifier into a subtitle sequence:
 * - `local`: pre-supplied subtitle files on disk
 * - `scrape`: caption manifest embedded in the public watch page
 * - `external_tool`: an external caption extraction process
 *
 * Sources report failures through `AcquisitionError` and never panic or
 * leak transport errors of their own; the orchestrator decides what the
 * caller gets to see.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::AcquisitionError;
use crate::subtitle::Subtitle;
use crate::video_id::VideoId;

/// Common trait for all subtitle sources
///
/// This trait defines the interface that all source implementations must
/// follow, allowing them to be used interchangeably by the orchestrator.
#[async_trait]
pub trait SubtitleSource: Send + Sync + Debug {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Fetch and parse the subtitles of a video
    ///
    /// # Arguments
    /// * `video_id` - The validated video identifier
    ///
    /// # Returns
    /// * `Ok(entries)` - Parsed entries, possibly empty
    /// * `Err(AcquisitionError)` - Why nothing could be obtained
    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<Subtitle>, AcquisitionError>;
}

pub mod external_tool;
pub mod local;
pub mod scrape;

pub use self::external_tool::ExternalToolSource;
pub use self::local::LocalFileSource;
pub use self::scrape::ScrapeSource;

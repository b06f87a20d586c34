/*!
 * # shadowsub
 *
 * Subtitle acquisition, playback sync and shadowing scores for practising
 * spoken English against YouTube videos.
 *
 * ## Features
 *
 * - Acquire time-aligned captions for a video from:
 *   - pre-supplied local subtitle files
 *   - the caption manifest embedded in the public watch page
 *   - an external caption extraction tool (yt-dlp compatible)
 * - Normalize three caption formats (block subtitle files, cue-based web
 *   captions, structured event lists) into one subtitle model
 * - Track the active subtitle during playback and loop an A/B region
 * - Score a spoken transcript against the reference caption
 * - Keep a list of favorite videos
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `video_id`: Video identifier validation
 * - `subtitle`: Normalized subtitle model
 * - `formats`: Caption format parsers:
 *   - `formats::timecode`: Shared timecode primitive
 *   - `formats::srt`: Block subtitle files
 *   - `formats::vtt`: Cue-based web captions
 *   - `formats::json3`: Structured event lists
 * - `sources`: Subtitle sources behind one `SubtitleSource` trait
 * - `acquisition`: Local-first orchestrator over the sources
 * - `playback`: Player capability, sync engine and playback session
 * - `scoring`: Transcript scoring and the speech capability
 * - `favorites`: Favorite videos store
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod acquisition;
pub mod app_config;
pub mod errors;
pub mod favorites;
pub mod file_utils;
pub mod formats;
pub mod language_utils;
pub mod playback;
pub mod scoring;
pub mod sources;
pub mod subtitle;
pub mod video_id;

// Re-export main types for easier usage
pub use acquisition::{acquire_subtitles, SubtitleAcquirer};
pub use app_config::{AcquisitionMode, Config};
pub use errors::{AcquisitionError, AppError, PlayerError, SpeechError};
pub use favorites::{FavoriteVideo, FavoritesStore};
pub use playback::{PlaybackSession, RepeatRegion, SyncEngine, VideoPlayer};
pub use scoring::{score_transcript, ComparisonReport, ShadowingCoach, SpeechRecognizer};
pub use sources::SubtitleSource;
pub use subtitle::{Subtitle, SubtitleCollection};
pub use video_id::VideoId;

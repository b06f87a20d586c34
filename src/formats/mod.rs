/*!
 * Caption wire formats.
 *
 * Each parser turns one upstream format into the same normalized
 * `Subtitle` sequence:
 *
 * - `srt`: block-based subtitle files (comma milliseconds)
 * - `vtt`: cue-based web captions (dot milliseconds, inline markup)
 * - `json3`: structured event lists (integer millisecond offsets)
 *
 * `timecode` holds the shared timecode primitive.
 */

pub mod json3;
pub mod srt;
pub mod timecode;
pub mod vtt;

pub use self::json3::{parse_events, parse_json3};
pub use self::srt::parse_srt;
pub use self::timecode::{format_timecode, parse_timecode, timecode_to_seconds};
pub use self::vtt::parse_vtt;

/*!
 * Timecode parsing shared by every caption format.
 *
 * Timecodes are fixed width: two-digit hours, minutes and seconds followed
 * by three-digit milliseconds, separated by either `,` (subtitle files) or
 * `.` (web captions). Values are converted to fractional seconds without
 * rounding.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// @const: A single timecode, either separator
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2})[,.](\d{3})$").unwrap()
});

/// Combine the four timecode components into seconds
pub fn timecode_to_seconds(hours: u64, minutes: u64, seconds: u64, millis: u64) -> f64 {
    (hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0
}

/// Parse `HH:MM:SS,mmm` or `HH:MM:SS.mmm` into seconds.
///
/// Returns `None` when the text is not a fixed-width timecode; callers treat
/// such lines as non-timing content.
pub fn parse_timecode(text: &str) -> Option<f64> {
    let caps = TIMECODE_REGEX.captures(text.trim())?;
    seconds_from_captures(&caps, 1)
}

/// Read four consecutive capture groups starting at `first_group`.
///
/// Used by the range patterns of the individual formats, which capture
/// start and end timecodes as groups 1-4 and 5-8.
pub fn seconds_from_captures(caps: &Captures, first_group: usize) -> Option<f64> {
    let component = |offset: usize| -> Option<u64> {
        caps.get(first_group + offset)?.as_str().parse().ok()
    };

    Some(timecode_to_seconds(
        component(0)?,
        component(1)?,
        component(2)?,
        component(3)?,
    ))
}

/// Format seconds as a timecode using the given millisecond separator
pub fn format_timecode(seconds: f64, separator: char) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!("{:02}:{:02}:{:02}{}{:03}", hours, minutes, secs, separator, millis)
}

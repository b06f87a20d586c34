/*!
 * Cue-style web caption parser.
 *
 * Auto-generated tracks carry word-level timing and styling inline:
 *
 * ```text
 * 00:00:01.319 --> 00:00:03.830 align:start position:0%
 * hello<00:00:01.520><c> world</c>
 * ```
 *
 * and re-emit the previous line as scroll context in the following cue.
 * The parser strips the inline markup and drops a cue whose text repeats
 * the one emitted immediately before it.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::timecode::seconds_from_captures;
use crate::subtitle::Subtitle;

// @const: Cue timing line, directives may follow the end time
static CUE_TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2})\.(\d{3}) --> (\d{2}):(\d{2}):(\d{2})\.(\d{3})").unwrap()
});

// @const: Inline word timestamps such as <00:00:01.520>
static INLINE_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\d{2}:\d{2}:\d{2}\.\d{3}>").unwrap()
});

// @const: Styling start/end tags (<c>, </c>, <c.colorE5E5E5>, <i>, <v Speaker> ...)
static STYLE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?(?:c|b|i|u|v|lang|ruby|rt)(?:[.\s][^>]*)?>").unwrap()
});

// @const: Positioning directives that leak into text lines
static POSITIONING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:align|position|line|size|region|vertical):\S+").unwrap()
});

fn is_timing_line(line: &str) -> bool {
    line.contains("-->")
}

/// Remove inline markup from one caption text line.
///
/// Returns `None` for lines that carry no speech: empty after stripping,
/// or bracketed annotations such as `[Music]`.
pub fn clean_cue_line(line: &str) -> Option<String> {
    let stripped = INLINE_TIMESTAMP_REGEX.replace_all(line, "");
    let stripped = STYLE_TAG_REGEX.replace_all(&stripped, "");
    let stripped = POSITIONING_REGEX.replace_all(&stripped, "");
    let stripped = stripped.trim();

    if stripped.is_empty() || stripped.starts_with('[') {
        return None;
    }

    Some(stripped.to_string())
}

/// Parse web caption content into a de-duplicated subtitle sequence.
///
/// Ids are dense over the emitted entries.
pub fn parse_vtt(content: &str) -> Vec<Subtitle> {
    let normalized = content.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.lines().collect();

    let mut entries: Vec<Subtitle> = Vec::new();
    let mut repeated = 0usize;
    let mut i = 0;

    while i < lines.len() {
        // Header, NOTE blocks, cue identifiers and malformed timing lines all end up here
        let Some(caps) = CUE_TIMING_REGEX.captures(lines[i]) else {
            i += 1;
            continue;
        };
        i += 1;

        let (Some(start_time), Some(end_time)) =
            (seconds_from_captures(&caps, 1), seconds_from_captures(&caps, 5))
        else {
            continue;
        };

        let mut text_lines: Vec<String> = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() && !is_timing_line(lines[i]) {
            if let Some(cleaned) = clean_cue_line(lines[i]) {
                text_lines.push(cleaned);
            }
            i += 1;
        }

        let text = text_lines.join(" ").trim().to_string();
        if text.is_empty() {
            continue;
        }

        if entries.last().is_some_and(|last| last.text == text) {
            repeated += 1;
            continue;
        }

        let id = entries.len() + 1;
        entries.push(Subtitle::new(id, start_time, end_time, text));
    }

    if repeated > 0 {
        debug!("Dropped {} cue(s) repeating the previous line", repeated);
    }

    entries
}

/*!
 * Block-style subtitle file parser.
 *
 * A file is a sequence of blank-line separated blocks:
 *
 * ```text
 * 1
 * 00:00:01,000 --> 00:00:04,000
 * First line
 * second line
 * ```
 *
 * The id on the first line is kept as written. Blocks with fewer than three
 * lines or with an unparseable timing line are dropped, never fatal.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::timecode::seconds_from_captures;
use crate::subtitle::Subtitle;

// @const: SRT timestamp range regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

// @const: Blank line between blocks, tolerating stray spaces
static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// Parse subtitle-file content into an ordered subtitle sequence
pub fn parse_srt(content: &str) -> Vec<Subtitle> {
    let normalized = content.replace("\r\n", "\n");
    let normalized = normalized.trim_start_matches('\u{FEFF}').trim();

    let mut entries: Vec<Subtitle> = Vec::new();
    let mut dropped = 0usize;

    for block in BLOCK_SEPARATOR.split(normalized) {
        let lines: Vec<&str> = block.split('\n').collect();
        if lines.len() < 3 {
            if !block.trim().is_empty() {
                dropped += 1;
            }
            continue;
        }

        let Some(caps) = TIMESTAMP_REGEX.captures(lines[1]) else {
            debug!("Skipping block with malformed timing line: {}", lines[1].trim());
            dropped += 1;
            continue;
        };

        let (Some(start_time), Some(end_time)) =
            (seconds_from_captures(&caps, 1), seconds_from_captures(&caps, 5))
        else {
            dropped += 1;
            continue;
        };

        let text = lines[2..]
            .iter()
            .map(|line| line.trim())
            .collect::<Vec<_>>()
            .join(" ");
        let text = text.trim();
        if text.is_empty() {
            dropped += 1;
            continue;
        }

        let id = match lines[0].trim().parse::<usize>() {
            Ok(id) => id,
            Err(_) => {
                let fallback = entries.len() + 1;
                warn!("Block id '{}' is not numeric, using position {}", lines[0].trim(), fallback);
                fallback
            }
        };

        entries.push(Subtitle::new(id, start_time, end_time, text.to_string()));
    }

    if dropped > 0 {
        debug!("Dropped {} malformed subtitle block(s)", dropped);
    }

    entries
}

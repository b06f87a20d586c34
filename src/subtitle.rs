use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::formats::timecode::format_timecode;
use crate::video_id::VideoId;

// @module: Normalized subtitle model

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtitle {
    // @field: 1-based sequence id
    pub id: usize,

    // @field: Start time in seconds
    pub start_time: f64,

    // @field: End time in seconds
    pub end_time: f64,

    // @field: Trimmed subtitle text
    pub text: String,
}

impl Subtitle {
    pub fn new(id: usize, start_time: f64, end_time: f64, text: String) -> Self {
        Subtitle {
            id,
            start_time,
            end_time,
            text,
        }
    }

    // @creates: Validated subtitle entry
    // @validates: Time range and non-empty text
    pub fn new_validated(id: usize, start_time: f64, end_time: f64, text: String) -> Result<Self> {
        if id == 0 {
            return Err(anyhow!("Subtitle ids are 1-based"));
        }

        if !start_time.is_finite() || start_time < 0.0 {
            return Err(anyhow!("Invalid start time {} for entry {}", start_time, id));
        }

        if !end_time.is_finite() || end_time <= start_time {
            return Err(anyhow!(
                "Invalid time range: end time {} <= start time {}",
                end_time, start_time
            ));
        }

        let trimmed_text = text.trim();
        if trimmed_text.is_empty() {
            return Err(anyhow!("Empty subtitle text for entry {}", id));
        }

        Ok(Subtitle {
            id,
            start_time,
            end_time,
            text: trimmed_text.to_string(),
        })
    }

    /// Whether `position` falls inside this entry, both bounds inclusive
    pub fn contains(&self, position: f64) -> bool {
        self.start_time <= position && position <= self.end_time
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Start time formatted as an SRT timestamp
    pub fn format_start_time(&self) -> String {
        format_timecode(self.start_time, ',')
    }

    /// End time formatted as an SRT timestamp
    pub fn format_end_time(&self) -> String {
        format_timecode(self.end_time, ',')
    }
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.id)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordering and timing anomalies found in a subtitle sequence.
///
/// Upstream sources do not always honour the model's ordering rules, so
/// the acquisition layer reports these for diagnostics instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceReport {
    /// Entries whose id does not increase over the previous one
    pub non_increasing_ids: usize,
    /// Entries starting before the previous entry
    pub out_of_order: usize,
    /// Entries whose end is not after their start
    pub inverted: usize,
    /// Entries overlapping the previous entry
    pub overlapping: usize,
}

impl SequenceReport {
    pub fn is_clean(&self) -> bool {
        self.non_increasing_ids == 0 && self.out_of_order == 0 && self.inverted == 0
    }
}

/// Inspect a sequence for anomalies without modifying it
pub fn check_sequence(entries: &[Subtitle]) -> SequenceReport {
    let mut report = SequenceReport::default();

    for entry in entries {
        if !(entry.end_time > entry.start_time) {
            report.inverted += 1;
        }
    }

    for pair in entries.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.id <= prev.id {
            report.non_increasing_ids += 1;
        }
        if next.start_time < prev.start_time {
            report.out_of_order += 1;
        }
        if prev.end_time > next.start_time {
            report.overlapping += 1;
        }
    }

    report
}

/// Subtitles acquired for one video
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Video the subtitles belong to
    pub video_id: VideoId,

    /// List of subtitle entries
    pub entries: Vec<Subtitle>,
}

impl SubtitleCollection {
    pub fn new(video_id: VideoId, entries: Vec<Subtitle>) -> Self {
        SubtitleCollection { video_id, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the entries in subtitle-file format
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    /// Render the entries as a JSON array
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries).context("Failed to serialize subtitles to JSON")
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for entry in &self.entries {
            write!(file, "{}", entry)?;
        }

        if self.entries.is_empty() {
            warn!("Wrote an empty subtitle file for {}", self.video_id);
        }

        Ok(())
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Video: {}", self.video_id)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}

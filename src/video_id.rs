use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AcquisitionError;

// @module: Video identifier validation

// @const: Bare identifier, exactly 11 characters
static VIDEO_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap()
});

// @const: Identifier embedded in a watch, short or embed URL
static VIDEO_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?(?:[^#\s]*&)?v=|youtu\.be/|youtube\.com/embed/)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)").unwrap()
});

/// A validated video identifier.
///
/// Holding a `VideoId` proves the value is exactly 11 characters from
/// `[A-Za-z0-9_-]`. The identifier ends up in URLs and on the command line
/// of the extraction tool, so nothing else is ever accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Validate a bare identifier
    pub fn parse(input: &str) -> Result<Self, AcquisitionError> {
        if VIDEO_ID_REGEX.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(AcquisitionError::InvalidInput(describe(input)))
        }
    }

    /// Accept a bare identifier or a watch/short/embed URL
    pub fn from_input(input: &str) -> Result<Self, AcquisitionError> {
        let input = input.trim();

        if let Some(caps) = VIDEO_URL_REGEX.captures(input) {
            return Self::parse(&caps[1]);
        }

        Self::parse(input)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public watch page URL for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Medium-quality thumbnail URL
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", self.0)
    }
}

// Keep log lines short when someone pastes a whole page into the prompt
fn describe(input: &str) -> String {
    const MAX_CHARS: usize = 40;
    if input.chars().count() > MAX_CHARS {
        let head: String = input.chars().take(MAX_CHARS).collect();
        format!("'{}...' (expected 11 characters from [A-Za-z0-9_-])", head)
    } else {
        format!("'{}' (expected 11 characters from [A-Za-z0-9_-])", input)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for VideoId {
    type Err = AcquisitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_input(s)
    }
}

impl TryFrom<String> for VideoId {
    type Error = AcquisitionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

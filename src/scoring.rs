/*!
 * Transcript scoring for shadowing attempts.
 *
 * The score is word-overlap: the share of reference words that appear
 * anywhere in the recognized transcript. Order and multiplicity are
 * ignored.
 */

use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fmt::Debug;

use crate::errors::SpeechError;

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Accuracy percentage in `[0, 100]` of `recognized` against `reference`.
///
/// An empty transcript or an empty reference scores 0.
pub fn score_transcript(reference: &str, recognized: &str) -> u32 {
    ComparisonReport::new(reference, recognized).accuracy
}

/// Word-level comparison of one attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub reference: String,
    pub recognized: String,
    /// Accuracy percentage, 0 to 100
    pub accuracy: u32,
    /// Reference words found in the transcript, in reference order
    pub matched_words: Vec<String>,
    /// Reference words missing from the transcript, in reference order
    pub missed_words: Vec<String>,
}

impl ComparisonReport {
    pub fn new(reference: &str, recognized: &str) -> Self {
        let reference_words = words(reference);
        let recognized_words: HashSet<String> = words(recognized).into_iter().collect();

        let (matched_words, missed_words): (Vec<String>, Vec<String>) = reference_words
            .into_iter()
            .partition(|word| recognized_words.contains(word));

        let total = matched_words.len() + missed_words.len();
        let accuracy = if recognized_words.is_empty() || total == 0 {
            0
        } else {
            (matched_words.len() as f64 / total as f64 * 100.0).round() as u32
        };

        Self {
            reference: reference.to_string(),
            recognized: recognized.to_string(),
            accuracy,
            matched_words,
            missed_words,
        }
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Accuracy: {}%", self.accuracy)?;
        writeln!(f, "Reference:  {}", self.reference)?;
        writeln!(f, "Recognized: {}", self.recognized)?;
        if !self.missed_words.is_empty() {
            writeln!(f, "Missed: {}", self.missed_words.join(", "))?;
        }
        Ok(())
    }
}

/// External speech-to-text capability
#[async_trait]
pub trait SpeechRecognizer: Send + Sync + Debug {
    /// Whether recording can be offered at all
    fn is_supported(&self) -> bool;

    async fn start(&self) -> Result<(), SpeechError>;

    /// Stop recording and return the final transcript
    async fn stop(&self) -> Result<String, SpeechError>;
}

/// Records a shadowing attempt and scores it against a reference line
#[derive(Debug)]
pub struct ShadowingCoach<R: SpeechRecognizer> {
    recognizer: R,
}

impl<R: SpeechRecognizer> ShadowingCoach<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_supported()
    }

    /// Start recording; refused when the recognizer is unsupported
    pub async fn begin_attempt(&self) -> Result<(), SpeechError> {
        if !self.recognizer.is_supported() {
            return Err(SpeechError::Unsupported);
        }
        self.recognizer.start().await
    }

    /// Stop recording and compare the transcript with `reference`
    pub async fn finish_attempt(&self, reference: &str) -> Result<ComparisonReport, SpeechError> {
        let transcript = self.recognizer.stop().await?;
        let report = ComparisonReport::new(reference, transcript.trim());

        debug!("Matched {:?}, missed {:?}", report.matched_words, report.missed_words);
        info!("Shadowing attempt scored {}%", report.accuracy);
        Ok(report)
    }

    /// Record one full attempt against `reference`
    pub async fn record_attempt(&self, reference: &str) -> Result<ComparisonReport, SpeechError> {
        self.begin_attempt().await?;
        self.finish_attempt(reference).await
    }
}

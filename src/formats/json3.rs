/*!
 * Structured event-list caption payload (the `fmt=json3` timed text format).
 *
 * ```json
 * {"events": [{"tStartMs": 1000, "dDurationMs": 2000,
 *              "segs": [{"utf8": "a"}, {"utf8": "b"}]}]}
 * ```
 *
 * Events without `segs` are window/style declarations and carry no text.
 */

use serde::Deserialize;

use crate::errors::AcquisitionError;
use crate::subtitle::Subtitle;

/// Top-level timed text payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimedTextPayload {
    /// Events in payload order; absent when the track is empty
    #[serde(default)]
    pub events: Option<Vec<TimedTextEvent>>,
}

/// One timed event
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedTextEvent {
    /// Start offset in milliseconds
    #[serde(default)]
    pub t_start_ms: Option<u64>,
    /// Duration in milliseconds
    #[serde(default)]
    pub d_duration_ms: Option<u64>,
    /// Text runs, in display order
    #[serde(default)]
    pub segs: Option<Vec<TimedTextSegment>>,
}

/// One text run of an event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimedTextSegment {
    #[serde(default)]
    pub utf8: Option<String>,
}

impl TimedTextEvent {
    fn text(&self) -> String {
        self.segs
            .iter()
            .flatten()
            .filter_map(|seg| seg.utf8.as_deref())
            .collect::<String>()
            .replace('\n', " ")
            .trim()
            .to_string()
    }
}

/// Convert a decoded payload into subtitles.
///
/// A missing event list yields an empty sequence.
pub fn parse_events(payload: &TimedTextPayload) -> Vec<Subtitle> {
    let Some(events) = payload.events.as_ref() else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for event in events.iter().filter(|event| event.segs.is_some()) {
        let text = event.text();
        if text.is_empty() {
            continue;
        }

        let start_ms = event.t_start_ms.unwrap_or(0);
        let end_ms = start_ms.saturating_add(event.d_duration_ms.unwrap_or(0));

        entries.push(Subtitle::new(
            entries.len() + 1,
            start_ms as f64 / 1000.0,
            end_ms as f64 / 1000.0,
            text,
        ));
    }

    entries
}

/// Decode a raw payload body and convert it
pub fn parse_json3(body: &str) -> Result<Vec<Subtitle>, AcquisitionError> {
    let payload: TimedTextPayload = serde_json::from_str(body)
        .map_err(|e| AcquisitionError::ParseFailure(format!("timed text payload: {}", e)))?;

    Ok(parse_events(&payload))
}

/*!
 * Watch-page scraping source.
 *
 * The public watch page embeds the player configuration, which includes a
 * `"captionTracks": [...]` manifest. Locating it is substring work on HTML
 * and inherently fragile, so all of it lives in `extract_caption_tracks`;
 * the rest of the source only deals with typed tracks.
 */

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use std::borrow::Cow;
use std::time::Duration;
use url::Url;

use crate::app_config::AcquisitionConfig;
use crate::errors::AcquisitionError;
use crate::formats::parse_json3;
use crate::language_utils::get_language_name;
use crate::sources::SubtitleSource;
use crate::subtitle::Subtitle;
use crate::video_id::VideoId;

const MANIFEST_KEY: &str = "\"captionTracks\"";
const ESCAPED_MANIFEST_KEY: &str = "\\\"captionTracks\\\"";

/// One entry of the caption manifest
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    /// Timed text endpoint for this track
    pub base_url: String,
    /// Track language, e.g. "en"
    #[serde(default)]
    pub language_code: String,
}

/// Find the bounding `[` ... `]` of the array starting at or after `from`.
///
/// Brackets inside JSON strings are ignored.
fn isolate_array(text: &str, from: usize) -> Option<&str> {
    let open = from + text.get(from..)?.find('[')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[open..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[open..=open + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Undo the escaping the manifest picks up from being embedded in HTML/JS
fn unescape_manifest(raw: &str) -> String {
    raw.replace("\\u0026", "&")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("\\\"", "\"")
}

/// Extract the caption manifest from a watch page.
///
/// The manifest shows up either as plain JSON inside the player config or,
/// when the config is itself a string literal, with every quote escaped.
///
/// # Returns
/// * `Ok(tracks)` - The manifest, possibly empty
/// * `Err(SourceUnavailable)` - The page carries no manifest at all
/// * `Err(ParseFailure)` - A manifest is present but cannot be decoded
pub fn extract_caption_tracks(html: &str) -> Result<Vec<CaptionTrack>, AcquisitionError> {
    let (text, key_at) = if let Some(at) = html.find(MANIFEST_KEY) {
        (Cow::Borrowed(html), at)
    } else if let Some(at) = html.find(ESCAPED_MANIFEST_KEY) {
        (Cow::Owned(unescape_manifest(&html[at..])), 0)
    } else {
        return Err(AcquisitionError::SourceUnavailable("no caption manifest on page".to_string()));
    };

    let raw = isolate_array(&text, key_at + MANIFEST_KEY.len())
        .ok_or_else(|| AcquisitionError::ParseFailure("unterminated caption manifest".to_string()))?;

    let mut tracks = serde_json::from_str::<Vec<CaptionTrack>>(raw)
        .or_else(|_| serde_json::from_str::<Vec<CaptionTrack>>(&unescape_manifest(raw)))
        .map_err(|e| AcquisitionError::ParseFailure(format!("caption manifest: {}", e)))?;

    for track in &mut tracks {
        if track.base_url.contains("&amp;") {
            track.base_url = track.base_url.replace("&amp;", "&");
        }
    }

    Ok(tracks)
}

/// Pick the track to fetch: exact language match first, else the first track
pub fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .find(|track| track.language_code == language)
        .or_else(|| tracks.first())
}

/// Payload URL of a track, requesting the structured event-list format
pub fn payload_url(track: &CaptionTrack) -> Result<Url, AcquisitionError> {
    let mut url = Url::parse(&track.base_url)
        .map_err(|e| AcquisitionError::ParseFailure(format!("track url '{}': {}", track.base_url, e)))?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "fmt")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("fmt", "json3");

    Ok(url)
}

/// Scrapes the watch page for a caption manifest and fetches one track
#[derive(Debug, Clone)]
pub struct ScrapeSource {
    /// HTTP client for making requests
    client: Client,
    /// Base URL of the watch page
    watch_url_base: String,
    /// Language preferred when picking a track
    preferred_language: String,
    /// Request timeout, reported when a request times out
    timeout_secs: u64,
}

impl ScrapeSource {
    pub fn new(
        watch_url_base: impl Into<String>,
        user_agent: &str,
        preferred_language: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .user_agent(user_agent)
                .build()
                .unwrap_or_default(),
            watch_url_base: watch_url_base.into(),
            preferred_language: preferred_language.into(),
            timeout_secs,
        }
    }

    /// Create a scrape source from configuration
    pub fn from_config(config: &AcquisitionConfig) -> Self {
        let language = crate::language_utils::normalize_to_part1_or_part2t(&config.preferred_language)
            .unwrap_or_else(|_| config.preferred_language.clone());

        Self::new(
            config.watch_url_base.clone(),
            &config.user_agent,
            language,
            config.http_timeout_secs,
        )
    }

    fn page_url(&self, video_id: &VideoId) -> Result<Url, AcquisitionError> {
        Url::parse_with_params(&self.watch_url_base, &[("v", video_id.as_str())])
            .map_err(|e| AcquisitionError::SourceUnavailable(format!("watch url: {}", e)))
    }

    fn transport_error(&self, what: &str, error: reqwest::Error) -> AcquisitionError {
        if error.is_timeout() {
            AcquisitionError::Timeout { seconds: self.timeout_secs }
        } else {
            AcquisitionError::SourceUnavailable(format!("{}: {}", what, error))
        }
    }

    async fn get_text(&self, url: Url, what: &str) -> Result<String, AcquisitionError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(what, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| self.transport_error(what, e))?;

        response.text().await.map_err(|e| self.transport_error(what, e))
    }
}

#[async_trait]
impl SubtitleSource for ScrapeSource {
    fn name(&self) -> &'static str {
        "page scrape"
    }

    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<Subtitle>, AcquisitionError> {
        let html = self.get_text(self.page_url(video_id)?, "watch page").await?;

        let tracks = extract_caption_tracks(&html)?;
        debug!(
            "Caption manifest for {} lists {} track(s): {}",
            video_id,
            tracks.len(),
            tracks.iter().map(|t| t.language_code.as_str()).collect::<Vec<_>>().join(", ")
        );

        let track = select_track(&tracks, &self.preferred_language)
            .ok_or_else(|| AcquisitionError::SourceUnavailable("caption manifest is empty".to_string()))?;

        if track.language_code != self.preferred_language {
            let wanted = get_language_name(&self.preferred_language).unwrap_or_else(|_| self.preferred_language.clone());
            info!(
                "No {} captions for {}, using '{}' track",
                wanted, video_id, track.language_code
            );
        }

        let body = self.get_text(payload_url(track)?, "caption payload").await?;
        parse_json3(&body)
    }
}

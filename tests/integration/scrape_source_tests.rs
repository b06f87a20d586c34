/*!
 * Watch page scraping against a local HTTP server
 */

use anyhow::Result;

use shadowsub::acquisition::SubtitleAcquirer;
use shadowsub::errors::AcquisitionError;
use shadowsub::sources::{LocalFileSource, ScrapeSource, SubtitleSource};
use shadowsub::video_id::VideoId;
use crate::common;

fn video() -> VideoId {
    VideoId::parse("dQw4w9WgXcQ").unwrap()
}

fn source(base: &str) -> ScrapeSource {
    ScrapeSource::new(format!("{}/watch", base), "test-agent", "en", 5)
}

/// Manifest with a German track the server does not serve and an English one it does
const TWO_TRACKS: &str = r#"[{"baseUrl":"{base}/api/unserved?v=dQw4w9WgXcQ&lang=de","languageCode":"de"},{"baseUrl":"{base}/api/timedtext?v=dQw4w9WgXcQ&lang=en&fmt=srv3","languageCode":"en"}]"#;

#[tokio::test]
async fn test_fetch_withPreferredTrack_shouldParseEventPayload() -> Result<()> {
    let base = common::spawn_http_server(vec![
        ("/watch", common::watch_page(TWO_TRACKS)),
        ("/api/timedtext", common::SAMPLE_JSON3.to_string()),
    ])
    .await?;

    let entries = source(&base).fetch(&video()).await?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text, "ab");
    assert_eq!(entries[0].start_time, 1.0);
    assert_eq!(entries[0].end_time, 3.0);
    assert_eq!(entries[1].text, "second line");
    assert_eq!(entries[1].id, 2);
    Ok(())
}

#[tokio::test]
async fn test_fetch_withEscapedManifest_shouldStillFindTracks() -> Result<()> {
    let page = r#"<script>var cfg = "{\"captions\":{\"captionTracks\":[{\"baseUrl\":\"{base}/api/timedtext?v=dQw4w9WgXcQ\\u0026lang=en\",\"languageCode\":\"en\"}]}}";</script>"#;
    let base = common::spawn_http_server(vec![
        ("/watch", page.to_string()),
        ("/api/timedtext", common::SAMPLE_JSON3.to_string()),
    ])
    .await?;

    let entries = source(&base).fetch(&video()).await?;

    assert_eq!(entries.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_fetch_withoutManifest_shouldBeUnavailable() -> Result<()> {
    let base = common::spawn_http_server(vec![("/watch", "<html>no captions here</html>".to_string())]).await?;

    let result = source(&base).fetch(&video()).await;

    assert!(matches!(result, Err(AcquisitionError::SourceUnavailable(_))));
    Ok(())
}

#[tokio::test]
async fn test_fetch_withEmptyManifest_shouldBeUnavailable() -> Result<()> {
    let base = common::spawn_http_server(vec![("/watch", common::watch_page("[]"))]).await?;

    let result = source(&base).fetch(&video()).await;

    assert!(matches!(result, Err(AcquisitionError::SourceUnavailable(_))));
    Ok(())
}

#[tokio::test]
async fn test_fetch_withMissingPayload_shouldBeUnavailable() -> Result<()> {
    let tracks = r#"[{"baseUrl":"{base}/api/gone?lang=en","languageCode":"en"}]"#;
    let base = common::spawn_http_server(vec![("/watch", common::watch_page(tracks))]).await?;

    let result = source(&base).fetch(&video()).await;

    assert!(matches!(result, Err(AcquisitionError::SourceUnavailable(_))));
    Ok(())
}

#[tokio::test]
async fn test_fetch_withGarbledPayload_shouldFailToParse() -> Result<()> {
    let tracks = r#"[{"baseUrl":"{base}/api/timedtext?lang=en","languageCode":"en"}]"#;
    let base = common::spawn_http_server(vec![
        ("/watch", common::watch_page(tracks)),
        ("/api/timedtext", "<transcript>xml</transcript>".to_string()),
    ])
    .await?;

    let result = source(&base).fetch(&video()).await;

    assert!(matches!(result, Err(AcquisitionError::ParseFailure(_))));
    Ok(())
}

#[tokio::test]
async fn test_acquire_withNoLocalFile_shouldFallBackToScrape() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let base = common::spawn_http_server(vec![
        ("/watch", common::watch_page(TWO_TRACKS)),
        ("/api/timedtext", common::SAMPLE_JSON3.to_string()),
    ])
    .await?;

    let acquirer = SubtitleAcquirer::new(
        Box::new(LocalFileSource::new(temp_dir.path(), "srt")),
        Box::new(source(&base)),
    );

    let entries = acquirer.acquire("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").await;
    assert_eq!(entries.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_acquire_withUnreachableServer_shouldReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let acquirer = SubtitleAcquirer::new(
        Box::new(LocalFileSource::new(temp_dir.path(), "srt")),
        Box::new(ScrapeSource::new("http://127.0.0.1:9/watch", "test-agent", "en", 2)),
    );

    assert!(acquirer.acquire("dQw4w9WgXcQ").await.is_empty());
    Ok(())
}

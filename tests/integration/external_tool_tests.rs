/*!
 * External caption tool process handling, driven by stand-in shell scripts
 */

use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use shadowsub::errors::AcquisitionError;
use shadowsub::sources::{ExternalToolSource, SubtitleSource};
use shadowsub::video_id::VideoId;
use crate::common;

fn video() -> VideoId {
    VideoId::parse("dQw4w9WgXcQ").unwrap()
}

/// Script body that finds the `-o` stem, copies `fixture` to `<stem>.<suffix>`
/// and records the stem in `marker`
#[cfg(unix)]
fn writing_tool(fixture: &Path, suffix: &str, marker: &Path) -> String {
    format!(
        r#"out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then
    shift
    out="$1"
  fi
  shift
done
echo "$out" > "{marker}"
cp "{fixture}" "$out.{suffix}""#,
        marker = marker.display(),
        fixture = fixture.display(),
        suffix = suffix
    )
}

#[test]
fn test_build_args_withVideoId_shouldPassUrlAfterSeparator() {
    let tool = ExternalToolSource::new("yt-dlp", Duration::from_secs(30), "en");

    let args = tool.build_args(&video(), Path::new("/tmp/work/dQw4w9WgXcQ"));

    let separator = args.iter().position(|a| a == "--").unwrap();
    assert_eq!(separator, args.len() - 2);
    assert_eq!(args[separator + 1], OsString::from("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
    assert!(args.contains(&OsString::from("en,en-orig")));
    assert!(args.contains(&OsString::from("--skip-download")));
    assert_eq!(tool.candidate_suffixes(), vec!["en.vtt", "en-orig.vtt"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_fetch_withCaptionFile_shouldParseAndCleanUp() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let fixture = common::create_test_file(temp_dir.path(), "fixture.vtt", common::SAMPLE_VTT)?;
    let marker = temp_dir.path().join("stem.txt");
    let script = common::create_script(temp_dir.path(), "tool.sh", &writing_tool(&fixture, "en.vtt", &marker))?;

    let tool = ExternalToolSource::new(script.to_string_lossy(), Duration::from_secs(10), "en");
    let entries = tool.fetch(&video()).await?;

    let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["hello world", "how are you", "fine thanks"]);

    let stem = PathBuf::from(std::fs::read_to_string(&marker)?.trim());
    assert!(!PathBuf::from(format!("{}.en.vtt", stem.display())).exists());
    assert!(!stem.parent().unwrap().exists());
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_fetch_withOriginalLanguageFile_shouldFallBackToIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let fixture = common::create_test_file(temp_dir.path(), "fixture.vtt", common::SAMPLE_VTT)?;
    let marker = temp_dir.path().join("stem.txt");
    let script = common::create_script(temp_dir.path(), "tool.sh", &writing_tool(&fixture, "en-orig.vtt", &marker))?;

    let tool = ExternalToolSource::new(script.to_string_lossy(), Duration::from_secs(10), "en");

    assert_eq!(tool.fetch(&video()).await?.len(), 3);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_fetch_withFailingTool_shouldBeUnavailable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let script = common::create_script(temp_dir.path(), "tool.sh", "echo 'ERROR: video unavailable' >&2\nexit 1")?;

    let tool = ExternalToolSource::new(script.to_string_lossy(), Duration::from_secs(10), "en");
    let result = tool.fetch(&video()).await;

    assert!(matches!(result, Err(AcquisitionError::SourceUnavailable(_))));
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_fetch_withHangingTool_shouldTimeOut() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let script = common::create_script(temp_dir.path(), "tool.sh", "sleep 5")?;

    let tool = ExternalToolSource::new(script.to_string_lossy(), Duration::from_secs(1), "en");
    let started = std::time::Instant::now();
    let result = tool.fetch(&video()).await;

    assert_eq!(result, Err(AcquisitionError::Timeout { seconds: 1 }));
    assert!(started.elapsed() < Duration::from_secs(4));
    Ok(())
}

#[tokio::test]
async fn test_fetch_withMissingExecutable_shouldBeUnavailable() {
    let tool = ExternalToolSource::new("/definitely/not/a/caption-tool", Duration::from_secs(5), "en");

    let result = tool.fetch(&video()).await;

    assert!(matches!(result, Err(AcquisitionError::SourceUnavailable(_))));
}

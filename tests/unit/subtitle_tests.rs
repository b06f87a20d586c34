/*!
 * Tests for the subtitle model, sequence checks and SRT export
 */

use anyhow::Result;
use shadowsub::formats::parse_srt;
use shadowsub::subtitle::{check_sequence, Subtitle, SubtitleCollection};
use shadowsub::video_id::VideoId;
use crate::common;

#[test]
fn test_new_validated_withValidEntry_shouldTrimText() -> Result<()> {
    let entry = Subtitle::new_validated(1, 1.0, 2.0, "  hello  ".to_string())?;
    assert_eq!(entry.text, "hello");
    Ok(())
}

#[test]
fn test_new_validated_withInvalidEntries_shouldFail() {
    assert!(Subtitle::new_validated(0, 1.0, 2.0, "zero id".to_string()).is_err());
    assert!(Subtitle::new_validated(1, -1.0, 2.0, "negative".to_string()).is_err());
    assert!(Subtitle::new_validated(1, 2.0, 2.0, "empty range".to_string()).is_err());
    assert!(Subtitle::new_validated(1, 1.0, 2.0, "   ".to_string()).is_err());
}

#[test]
fn test_contains_withBoundaryPositions_shouldBeInclusive() {
    let entry = Subtitle::new(1, 2.0, 5.0, "x".to_string());
    assert!(entry.contains(2.0));
    assert!(entry.contains(5.0));
    assert!(!entry.contains(5.001));
    assert!(!entry.contains(1.999));
}

#[test]
fn test_check_sequence_withWellFormedSequence_shouldBeClean() {
    let report = check_sequence(&parse_srt(common::SAMPLE_SRT));
    assert!(report.is_clean());
    assert_eq!(report.overlapping, 0);
}

#[test]
fn test_check_sequence_withAnomalies_shouldCountThem() {
    let entries = vec![
        Subtitle::new(1, 5.0, 8.0, "a".to_string()),
        Subtitle::new(1, 3.0, 4.0, "b".to_string()),
        Subtitle::new(2, 3.5, 3.5, "c".to_string()),
    ];
    let report = check_sequence(&entries);

    assert!(!report.is_clean());
    assert_eq!(report.non_increasing_ids, 1);
    assert_eq!(report.out_of_order, 1);
    assert_eq!(report.inverted, 1);
    assert_eq!(report.overlapping, 2);
}

#[test]
fn test_to_srt_string_withParsedFile_shouldParseBackToSameEntries() -> Result<()> {
    let entries = parse_srt(common::SAMPLE_SRT);
    let collection = SubtitleCollection::new(VideoId::parse("dQw4w9WgXcQ")?, entries.clone());

    let rendered = collection.to_srt_string();
    assert!(rendered.starts_with("1\n00:00:01,000 --> 00:00:04,000\nThis is a test subtitle.\n\n"));
    assert_eq!(parse_srt(&rendered), entries);
    Ok(())
}

#[test]
fn test_to_json_string_withEntries_shouldUseCamelCaseFields() -> Result<()> {
    let collection = SubtitleCollection::new(
        VideoId::parse("dQw4w9WgXcQ")?,
        common::subtitles(&[(1.0, 3.0, "ab")]),
    );

    let json: serde_json::Value = serde_json::from_str(&collection.to_json_string()?)?;
    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["startTime"], 1.0);
    assert_eq!(json[0]["endTime"], 3.0);
    assert_eq!(json[0]["text"], "ab");
    Ok(())
}

#[test]
fn test_write_to_srt_withNestedPath_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("video.srt");
    let collection = SubtitleCollection::new(VideoId::parse("dQw4w9WgXcQ")?, parse_srt(common::SAMPLE_SRT));

    collection.write_to_srt(&path)?;

    let written = std::fs::read_to_string(&path)?;
    assert_eq!(parse_srt(&written).len(), 3);
    Ok(())
}

/*!
 * Acquire subtitles, follow playback and score a spoken attempt end to end
 */

use anyhow::Result;
use std::sync::Arc;

use shadowsub::acquisition::acquire_subtitles;
use shadowsub::app_config::{AcquisitionConfig, PlaybackConfig};
use shadowsub::playback::PlaybackSession;
use shadowsub::scoring::ShadowingCoach;
use crate::common;
use crate::common::mocks::{MockPlayer, MockSpeech};

#[tokio::test]
async fn test_shadowing_withLocalSubtitles_shouldFollowAndScoreLine() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "dQw4w9WgXcQ.srt", common::SAMPLE_SRT)?;

    let config = AcquisitionConfig {
        subtitles_dir: temp_dir.path().to_path_buf(),
        // Never reached while a local file exists
        watch_url_base: "http://127.0.0.1:9/watch".to_string(),
        ..AcquisitionConfig::default()
    };
    let subtitles = acquire_subtitles(&config, "https://youtu.be/dQw4w9WgXcQ").await;
    assert_eq!(subtitles.len(), 3);

    let player = Arc::new(MockPlayer::new(6.0, 20.0));
    let session = PlaybackSession::new(player.clone(), &PlaybackConfig::default());
    session.load_video(subtitles).await;

    session.tick_once().await?;
    let line = session.active_subtitle().expect("a line is active at 6s");
    assert_eq!(line.id, 2);

    // Loop the active line while practicing it
    session.set_repeat(line.start_time, line.end_time);
    player.set_position(line.end_time);
    let outcome = session.tick_once().await?;
    assert_eq!(outcome.seek_to, Some(line.start_time));

    let coach = ShadowingCoach::new(MockSpeech::new("it contains many lines."));
    let report = coach.record_attempt(&line.text).await?;

    assert_eq!(report.accuracy, 75);
    assert_eq!(report.missed_words, vec!["multiple"]);
    Ok(())
}

#[tokio::test]
async fn test_shadowing_withInvalidVideo_shouldLoadNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = AcquisitionConfig {
        subtitles_dir: temp_dir.path().to_path_buf(),
        ..AcquisitionConfig::default()
    };

    let subtitles = acquire_subtitles(&config, "not a video").await;
    assert!(subtitles.is_empty());

    let session = PlaybackSession::new(Arc::new(MockPlayer::new(1.0, 10.0)), &PlaybackConfig::default());
    session.load_video(subtitles).await;

    assert_eq!(session.tick_once().await?.active, None);
    assert_eq!(session.snapshot().subtitle_count, 0);
    Ok(())
}

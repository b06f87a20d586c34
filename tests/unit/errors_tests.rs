/*!
 * Tests for error types
 */

use shadowsub::errors::{AcquisitionError, AppError, PlayerError, SpeechError};

#[test]
fn test_acquisition_error_display_shouldDescribeCause() {
    assert_eq!(
        AcquisitionError::InvalidInput("abc".to_string()).to_string(),
        "Invalid video identifier: abc"
    );
    assert_eq!(
        AcquisitionError::Timeout { seconds: 30 }.to_string(),
        "Subtitle source timed out after 30s"
    );
}

#[test]
fn test_is_invalid_input_shouldOnlyMatchInvalidInput() {
    assert!(AcquisitionError::InvalidInput("x".to_string()).is_invalid_input());
    assert!(!AcquisitionError::SourceUnavailable("x".to_string()).is_invalid_input());
    assert!(!AcquisitionError::ParseFailure("x".to_string()).is_invalid_input());
    assert!(!AcquisitionError::Timeout { seconds: 1 }.is_invalid_input());
}

#[test]
fn test_player_error_display_shouldIncludeCommand() {
    let error = PlayerError::CommandFailed {
        command: "seekTo".to_string(),
        message: "detached".to_string(),
    };

    assert_eq!(error.to_string(), "Player command 'seekTo' failed: detached");
    assert_eq!(PlayerError::UnsupportedRate(3.0).to_string(), "Unsupported playback rate: 3");
}

#[test]
fn test_app_error_from_shouldWrapDomainErrors() {
    let app: AppError = AcquisitionError::Timeout { seconds: 5 }.into();
    assert!(matches!(app, AppError::Acquisition(AcquisitionError::Timeout { seconds: 5 })));

    let app: AppError = SpeechError::Unsupported.into();
    assert_eq!(app.to_string(), "Speech error: Speech recognition is not supported");

    let app: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(app.to_string(), "Unknown error: boom");
}

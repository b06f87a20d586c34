/*!
 * Error types for the shadowsub library.
 *
 * This module contains custom error types for the different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 *
 * Acquisition errors never reach the UI layer as failures: every source
 * boundary degrades them to an empty subtitle sequence. `InvalidInput` is
 * the one variant callers get to see, because it points at a caller bug or
 * a hostile identifier rather than at an unavailable upstream.
 */

use thiserror::Error;

/// Errors that can occur while acquiring subtitles for a video
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AcquisitionError {
    /// The video identifier (or URL) failed format validation
    #[error("Invalid video identifier: {0}")]
    InvalidInput(String),

    /// Network, process or file failure, or no caption data upstream
    #[error("Subtitle source unavailable: {0}")]
    SourceUnavailable(String),

    /// A payload was obtained but could not be parsed
    #[error("Failed to parse subtitle payload: {0}")]
    ParseFailure(String),

    /// The external caption tool exceeded its execution bound
    #[error("Subtitle source timed out after {seconds}s")]
    Timeout {
        /// The bound that was exceeded, in seconds
        seconds: u64,
    },
}

impl AcquisitionError {
    /// Whether this error must be surfaced to the caller instead of
    /// being degraded to "no subtitles"
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Errors reported by the external video player capability
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayerError {
    /// The player is not ready to accept commands yet
    #[error("Player is not ready")]
    NotReady,

    /// The player rejected or failed a command
    #[error("Player command '{command}' failed: {message}")]
    CommandFailed {
        /// Name of the command that failed
        command: String,
        /// Message reported by the player
        message: String,
    },

    /// The requested playback rate is not offered
    #[error("Unsupported playback rate: {0}")]
    UnsupportedRate(f64),
}

/// Errors reported by the speech-to-text capability
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpeechError {
    /// Speech recognition is not available on this platform
    #[error("Speech recognition is not supported")]
    Unsupported,

    /// A recording was stopped without being started
    #[error("Not currently recording")]
    NotRecording,

    /// The recognizer failed
    #[error("Speech recognition failed: {0}")]
    Failed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from subtitle acquisition
    #[error("Acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    /// Error from the player
    #[error("Player error: {0}")]
    Player(#[from] PlayerError),

    /// Error from speech recognition
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::PlayerError;

/// External video player capability.
///
/// Implemented outside the crate (an embedded web player, a media
/// backend, a test double). The session owns the single handle and every
/// component reaches the player through it.
#[async_trait]
pub trait VideoPlayer: Send + Sync + Debug {
    async fn play(&self) -> Result<(), PlayerError>;

    async fn pause(&self) -> Result<(), PlayerError>;

    /// Seek to `seconds`; `allow_seek_ahead` lets the player request
    /// media it has not buffered yet
    async fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) -> Result<(), PlayerError>;

    async fn set_playback_rate(&self, rate: f64) -> Result<(), PlayerError>;

    /// Current playback position in seconds
    async fn current_time(&self) -> Result<f64, PlayerError>;

    /// Media duration in seconds, 0 while unknown
    async fn duration(&self) -> Result<f64, PlayerError>;
}

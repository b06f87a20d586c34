/*!
 * Playback session.
 *
 * The session owns the single player handle, the sync engine state and the
 * ticker task that polls the player position. Ticks are serialized through
 * an async gate: a tick reads the position, runs the engine and awaits any
 * seek it requested before the next tick (or a video swap) may start.
 */

use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::player::VideoPlayer;
use super::repeat::RepeatRegion;
use super::sync::{SyncEngine, TickOutcome};
use crate::app_config::PlaybackConfig;
use crate::errors::PlayerError;
use crate::subtitle::Subtitle;

/// Playback rates offered to the learner
pub const SPEED_OPTIONS: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Point-in-time view of a session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub current_time: f64,
    pub duration: f64,
    pub active: Option<Subtitle>,
    pub repeat: RepeatRegion,
    pub speed: f64,
    pub playing: bool,
    pub subtitles_visible: bool,
    pub subtitle_count: usize,
}

#[derive(Debug)]
struct SessionState {
    engine: SyncEngine,
    current_time: f64,
    duration: f64,
    speed: f64,
    playing: bool,
    subtitles_visible: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            engine: SyncEngine::default(),
            current_time: 0.0,
            duration: 0.0,
            speed: 1.0,
            playing: false,
            subtitles_visible: true,
        }
    }
}

// Shared between the session and its ticker task
#[derive(Debug)]
struct SessionCore {
    player: Arc<dyn VideoPlayer>,
    state: Mutex<SessionState>,
    tick_gate: tokio::sync::Mutex<()>,
}

impl SessionCore {
    async fn tick(&self) -> Result<TickOutcome, PlayerError> {
        let _gate = self.tick_gate.lock().await;

        let position = self.player.current_time().await?;
        let outcome = {
            let mut state = self.state.lock();
            state.current_time = position;
            state.engine.tick(position)
        };

        if let Some(start) = outcome.seek_to {
            debug!("Repeat clamp at {:.3}s, seeking to {:.3}s", position, start);
            if let Err(e) = self.player.seek_to(start, true).await {
                self.state.lock().engine.rearm_clamp();
                return Err(e);
            }
            self.state.lock().current_time = start;
        }

        Ok(outcome)
    }
}

/// One video being practised
#[derive(Debug)]
pub struct PlaybackSession {
    core: Arc<SessionCore>,
    poll_interval: Duration,
    skip_seconds: f64,
    repeat_span: f64,
    ticker: Option<JoinHandle<()>>,
}

impl PlaybackSession {
    pub fn new(player: Arc<dyn VideoPlayer>, config: &PlaybackConfig) -> Self {
        Self {
            core: Arc::new(SessionCore {
                player,
                state: Mutex::new(SessionState::default()),
                tick_gate: tokio::sync::Mutex::new(()),
            }),
            poll_interval: Duration::from_millis(config.poll_interval_ms.max(1)),
            skip_seconds: config.skip_seconds,
            repeat_span: config.default_repeat_span_secs,
            ticker: None,
        }
    }

    /// Start polling the player; restarts a running ticker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.stop();

        let core = Arc::clone(&self.core);
        let period = self.poll_interval;

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if let Err(e) = core.tick().await {
                    debug!("Playback tick skipped: {}", e);
                }
            }
        }));

        debug!("Playback ticker started ({:?})", period);
    }

    /// Stop polling the player
    pub fn stop(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
            debug!("Playback ticker stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Run one tick now, serialized with the ticker
    pub async fn tick_once(&self) -> Result<TickOutcome, PlayerError> {
        self.core.tick().await
    }

    /// Swap in the subtitles of a newly loaded video.
    ///
    /// Waits for an in-flight tick so no tick mixes the old sequence with
    /// the new one. Resets the active subtitle and the repeat region.
    pub async fn load_video(&self, subtitles: Vec<Subtitle>) {
        let _gate = self.core.tick_gate.lock().await;
        let count = subtitles.len();

        {
            let mut state = self.core.state.lock();
            state.engine.replace_subtitles(Arc::from(subtitles));
            state.current_time = 0.0;
            state.duration = 0.0;
        }

        info!("Loaded video with {} subtitle entries", count);
    }

    pub async fn play(&self) -> Result<(), PlayerError> {
        self.core.player.play().await?;
        self.core.state.lock().playing = true;
        Ok(())
    }

    pub async fn pause(&self) -> Result<(), PlayerError> {
        self.core.player.pause().await?;
        self.core.state.lock().playing = false;
        Ok(())
    }

    /// Play when paused, pause when playing; returns the new playing flag
    pub async fn toggle_play(&self) -> Result<bool, PlayerError> {
        let playing = self.core.state.lock().playing;
        if playing {
            self.pause().await?;
        } else {
            self.play().await?;
        }
        Ok(!playing)
    }

    /// Move by `delta` seconds, clamped to the media bounds.
    ///
    /// While the duration is still unknown only the lower bound applies.
    pub async fn skip(&self, delta: f64) -> Result<f64, PlayerError> {
        let now = self.core.player.current_time().await?;
        let duration = self.refresh_duration().await?;

        let mut target = (now + delta).max(0.0);
        if duration > 0.0 {
            target = target.min(duration);
        }

        self.core.player.seek_to(target, true).await?;
        self.core.state.lock().current_time = target;
        Ok(target)
    }

    pub async fn skip_forward(&self) -> Result<f64, PlayerError> {
        self.skip(self.skip_seconds).await
    }

    pub async fn skip_back(&self) -> Result<f64, PlayerError> {
        self.skip(-self.skip_seconds).await
    }

    /// Change the playback rate to one of `SPEED_OPTIONS`
    pub async fn set_speed(&self, rate: f64) -> Result<(), PlayerError> {
        if !SPEED_OPTIONS.contains(&rate) {
            return Err(PlayerError::UnsupportedRate(rate));
        }

        self.core.player.set_playback_rate(rate).await?;
        self.core.state.lock().speed = rate;
        Ok(())
    }

    /// Seek to the start of subtitle `id`; `false` when no such entry exists
    pub async fn seek_to_subtitle(&self, id: usize) -> Result<bool, PlayerError> {
        let start = {
            let state = self.core.state.lock();
            state
                .engine
                .subtitles()
                .iter()
                .find(|entry| entry.id == id)
                .map(|entry| entry.start_time)
        };

        let Some(start) = start else {
            warn!("No subtitle with id {}", id);
            return Ok(false);
        };

        self.core.player.seek_to(start, true).await?;
        self.core.state.lock().current_time = start;
        Ok(true)
    }

    /// Flip subtitle visibility; returns the new flag
    pub fn toggle_subtitles(&self) -> bool {
        let mut state = self.core.state.lock();
        state.subtitles_visible = !state.subtitles_visible;
        state.subtitles_visible
    }

    /// Query the player for the media duration and remember it
    pub async fn refresh_duration(&self) -> Result<f64, PlayerError> {
        let duration = self.core.player.duration().await?;
        self.core.state.lock().duration = duration;
        Ok(duration)
    }

    pub fn set_repeat(&self, start: f64, end: f64) -> RepeatRegion {
        self.edit_repeat(|region| region.set(start, end))
    }

    /// Set marker A at the current position
    pub async fn mark_repeat_start(&self) -> Result<RepeatRegion, PlayerError> {
        let now = self.core.player.current_time().await?;
        let span = self.repeat_span;
        Ok(self.edit_repeat(|region| region.mark_start(now, span)))
    }

    /// Set marker B at the current position
    pub async fn mark_repeat_end(&self) -> Result<RepeatRegion, PlayerError> {
        let now = self.core.player.current_time().await?;
        let span = self.repeat_span;
        Ok(self.edit_repeat(|region| region.mark_end(now, span)))
    }

    pub fn toggle_repeat(&self) -> RepeatRegion {
        self.edit_repeat(|region| {
            region.toggle();
        })
    }

    pub fn clear_repeat(&self) -> RepeatRegion {
        self.edit_repeat(RepeatRegion::clear)
    }

    fn edit_repeat(&self, edit: impl FnOnce(&mut RepeatRegion)) -> RepeatRegion {
        let mut state = self.core.state.lock();
        state.engine.update_repeat(edit);
        *state.engine.repeat()
    }

    /// The subtitle active at the last tick
    pub fn active_subtitle(&self) -> Option<Subtitle> {
        self.core.state.lock().engine.active_subtitle().cloned()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.core.state.lock();
        SessionSnapshot {
            current_time: state.current_time,
            duration: state.duration,
            active: state.engine.active_subtitle().cloned(),
            repeat: *state.engine.repeat(),
            speed: state.speed,
            playing: state.playing,
            subtitles_visible: state.subtitles_visible,
            subtitle_count: state.engine.subtitles().len(),
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.stop();
    }
}

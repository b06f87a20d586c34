/*!
 * Playback sync engine.
 *
 * Each tick maps a playback position to the active subtitle and checks the
 * repeat clamp. The engine never talks to the player itself; a requested
 * seek comes back in the `TickOutcome` for the session to apply.
 */

use std::sync::Arc;

use super::repeat::RepeatRegion;
use crate::subtitle::Subtitle;

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickOutcome {
    /// Active subtitle id after the tick
    pub active: Option<usize>,
    /// Whether the active subtitle differs from the previous tick
    pub changed: bool,
    /// Seek requested by the repeat clamp
    pub seek_to: Option<f64>,
}

/// Id of the first entry whose interval contains `position`, bounds inclusive
pub fn find_active(subtitles: &[Subtitle], position: f64) -> Option<usize> {
    find_active_index(subtitles, position).map(|index| subtitles[index].id)
}

// Position of the entry rather than its id; file ids are not guaranteed unique
fn find_active_index(subtitles: &[Subtitle], position: f64) -> Option<usize> {
    subtitles.iter().position(|entry| entry.contains(position))
}

#[derive(Debug, Clone)]
pub struct SyncEngine {
    subtitles: Arc<[Subtitle]>,
    active_index: Option<usize>,
    repeat: RepeatRegion,
    // Cleared when the clamp fires, set again once the position is back below the end
    clamp_armed: bool,
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new(Arc::from(Vec::new()))
    }
}

impl SyncEngine {
    pub fn new(subtitles: Arc<[Subtitle]>) -> Self {
        Self {
            subtitles,
            active_index: None,
            repeat: RepeatRegion::default(),
            clamp_armed: true,
        }
    }

    pub fn subtitles(&self) -> &Arc<[Subtitle]> {
        &self.subtitles
    }

    /// Id of the active entry
    pub fn active(&self) -> Option<usize> {
        self.active_subtitle().map(|entry| entry.id)
    }

    /// The active entry itself
    pub fn active_subtitle(&self) -> Option<&Subtitle> {
        self.subtitles.get(self.active_index?)
    }

    pub fn repeat(&self) -> &RepeatRegion {
        &self.repeat
    }

    /// Swap in the sequence of a newly loaded video.
    ///
    /// The previous sequence is never consulted again; the active subtitle
    /// and the repeat region are reset.
    pub fn replace_subtitles(&mut self, subtitles: Arc<[Subtitle]>) {
        self.subtitles = subtitles;
        self.active_index = None;
        self.repeat.clear();
        self.clamp_armed = true;
    }

    /// Edit the repeat region; any edit re-arms the clamp
    pub fn update_repeat<R>(&mut self, edit: impl FnOnce(&mut RepeatRegion) -> R) -> R {
        let result = edit(&mut self.repeat);
        self.clamp_armed = true;
        result
    }

    /// Arm the clamp again after a requested seek could not be applied
    pub fn rearm_clamp(&mut self) {
        self.clamp_armed = true;
    }

    /// Process one position update
    pub fn tick(&mut self, position: f64) -> TickOutcome {
        let active_index = find_active_index(&self.subtitles, position);
        let changed = active_index != self.active_index;
        self.active_index = active_index;
        let active = self.active();

        let mut seek_to = None;
        match self.repeat.bounds() {
            Some((start, end)) if self.repeat.enabled => {
                if position >= end {
                    if self.clamp_armed {
                        self.clamp_armed = false;
                        seek_to = Some(start);
                    }
                } else {
                    self.clamp_armed = true;
                }
            }
            _ => self.clamp_armed = true,
        }

        TickOutcome { active, changed, seek_to }
    }
}

use serde::{Deserialize, Serialize};

// @module: A/B repeat region

// @struct: Loop region between two marked timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RepeatRegion {
    // @field: Loop start (marker A)
    pub start: Option<f64>,

    // @field: Loop end (marker B)
    pub end: Option<f64>,

    // @field: Looping requested
    pub enabled: bool,
}

impl RepeatRegion {
    /// Whether the clamp applies: enabled with both bounds present.
    ///
    /// An enabled region with a missing bound is tolerated and inactive.
    pub fn is_active(&self) -> bool {
        self.enabled && self.bounds().is_some()
    }

    /// Both bounds, when set
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.start.zip(self.end)
    }

    /// Set both bounds and enable looping
    pub fn set(&mut self, start: f64, end: f64) {
        self.start = Some(start);
        self.end = Some(end);
        self.enabled = true;
    }

    /// Mark A at `now`, completing B as `now + span` when B is unset
    pub fn mark_start(&mut self, now: f64, span: f64) {
        let end = self.end.unwrap_or(now + span);
        self.set(now, end);
    }

    /// Mark B at `now`, completing A as `now - span` (not before 0) when A is unset
    pub fn mark_end(&mut self, now: f64, span: f64) {
        let start = self.start.unwrap_or((now - span).max(0.0));
        self.set(start, now);
    }

    /// Flip looping on or off; a no-op until both bounds exist
    pub fn toggle(&mut self) -> bool {
        if self.bounds().is_some() {
            self.enabled = !self.enabled;
        }
        self.enabled
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

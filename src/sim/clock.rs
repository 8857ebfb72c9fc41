//! Frame timestamp to delta-time conversion

use serde::{Deserialize, Serialize};

/// Converts animation-frame timestamps (ms) into per-tick delta seconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the baseline so the next `tick` returns 0
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous timestamp, never negative
    ///
    /// The first call after construction or `reset` records the baseline and
    /// returns 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}

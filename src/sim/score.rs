//! Time-based scoring

use serde::{Deserialize, Serialize};

use crate::consts::SCORE_RATE;

/// Accumulates score at a nominal 60 points per second of game time.
///
/// Each tick's contribution is floored, so very short frames can add
/// nothing; the score tracks frames elapsed more than wall time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Add `floor(dt * 60)` and return the new total
    pub fn accumulate(&mut self, dt: f32) -> u64 {
        let gained = (dt * SCORE_RATE).floor().max(0.0) as u64;
        self.score = self.score.saturating_add(gained);
        self.score
    }
}

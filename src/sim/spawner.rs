//! Obstacle construction and the difficulty curve
//!
//! Speed and cadence are pure functions of score so a run's difficulty
//! only depends on how far the player got.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A scrolling hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Handle the presentation layer keys its visual on
    pub id: u32,
    /// Left edge in play-area coordinates
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Leftward speed (units/s), fixed at spawn time
    pub speed: f32,
}

impl Obstacle {
    /// Right edge in play-area coordinates
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Fully past the left edge and safe to destroy
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() < DESPAWN_X
    }
}

/// Stateless obstacle factory
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ObstacleSpawner;

impl ObstacleSpawner {
    /// Scroll speed for obstacles spawned at `score`
    ///
    /// Steps up every 5 points and caps out 700 above the base speed.
    pub fn compute_speed(score: u64) -> f32 {
        let bonus = ((score / SPEED_STEP_SCORE).saturating_mul(SPEED_STEP)).min(MAX_SPEED_BONUS);
        BASE_SPEED + bonus as f32
    }

    /// Milliseconds between spawn opportunities at `score`
    pub fn compute_spawn_interval(score: u64) -> f32 {
        let reduction = (score / SPAWN_INTERVAL_STEP_SCORE).saturating_mul(SPAWN_INTERVAL_STEP_MS);
        BASE_SPAWN_INTERVAL_MS
            .saturating_sub(reduction)
            .max(MIN_SPAWN_INTERVAL_MS) as f32
    }

    /// Build a randomly sized obstacle just past the right edge
    pub fn spawn<R: Rng>(&self, id: u32, score: u64, area_width: f32, rng: &mut R) -> Obstacle {
        let width = rng.random_range(OBSTACLE_MIN_WIDTH..OBSTACLE_MAX_WIDTH);
        let height = rng.random_range(OBSTACLE_MIN_HEIGHT..OBSTACLE_MAX_HEIGHT);

        Obstacle {
            id,
            x: area_width + SPAWN_MARGIN,
            width,
            height,
            speed: Self::compute_speed(score),
        }
    }
}

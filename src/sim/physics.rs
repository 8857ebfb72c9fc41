//! Player body and vertical physics
//!
//! Semi-implicit Euler: velocity first, then position. Frames are short
//! enough that the arc height stays consistent from jump to jump.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The runner. Horizontal position is fixed; only the vertical axis moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    /// Height above the ground line (never negative)
    pub y: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            y: 0.0,
            vy: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            on_ground: true,
        }
    }
}

impl Player {
    /// Put the player back on the ground at rest
    pub fn reset(&mut self) {
        self.y = 0.0;
        self.vy = 0.0;
        self.on_ground = true;
    }

    /// Advance the jump arc by `dt` seconds
    ///
    /// A zero-length step changes nothing, so a jump requested just before
    /// the first frame of a run survives that frame.
    pub fn integrate(&mut self, dt: f32) {
        if dt <= 0.0 || (self.on_ground && self.vy == 0.0) {
            return;
        }

        self.vy += GRAVITY * dt;
        self.y += self.vy * dt;

        if self.y <= 0.0 {
            self.y = 0.0;
            self.vy = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }
    }

    /// Start a jump. Returns false (and changes nothing) while airborne.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = JUMP_VELOCITY;
        self.on_ground = false;
        true
    }

    /// Whether the player is mid-arc
    pub fn is_airborne(&self) -> bool {
        !self.on_ground
    }
}

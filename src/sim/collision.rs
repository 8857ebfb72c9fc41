//! Axis-aligned collision detection
//!
//! Boxes live in the play-area-local frame: origin at the top-left corner
//! of the play area, y pointing down. Both the player and the obstacles are
//! placed relative to the ground line, `GROUND_Y` above the area's bottom.
//!
//! Hitboxes are shrunk before testing so grazing contact is forgiven.

use serde::{Deserialize, Serialize};

use super::physics::Player;
use super::spawner::Obstacle;
use crate::consts::GROUND_Y;

/// Per-edge inset applied before an overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Player hitbox inset: generous on the sides and head, less at the feet
pub const PLAYER_MARGINS: Margins = Margins {
    left: 6.0,
    top: 6.0,
    right: 6.0,
    bottom: 4.0,
};

pub const OBSTACLE_MARGINS: Margins = Margins {
    left: 6.0,
    top: 4.0,
    right: 6.0,
    bottom: 2.0,
};

/// Axis-aligned rectangle (y down, so `top <= bottom` for a sane box)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box of the given size whose bottom-left corner is at (left, bottom)
    pub fn from_bottom_left(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self::new(left, bottom - height, left + width, bottom)
    }

    /// Move every edge inward by the given margins
    pub fn shrink(&self, m: Margins) -> Self {
        Self::new(
            self.left + m.left,
            self.top + m.top,
            self.right - m.right,
            self.bottom - m.bottom,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Overlap test on already-shrunk boxes. Touching edges count as overlap.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.left > b.right || a.right < b.left || a.top > b.bottom || a.bottom < b.top)
}

/// y of the ground line for a play area of the given height
#[inline]
pub fn ground_line(area_height: f32) -> f32 {
    area_height - GROUND_Y
}

/// Unshrunk player box in the play-area frame
pub fn player_box(player: &Player, area_height: f32) -> Rect {
    Rect::from_bottom_left(
        player.x,
        ground_line(area_height) - player.y,
        player.width,
        player.height,
    )
}

/// Unshrunk obstacle box in the play-area frame (obstacles sit on the ground)
pub fn obstacle_box(obstacle: &Obstacle, area_height: f32) -> Rect {
    Rect::from_bottom_left(
        obstacle.x,
        ground_line(area_height),
        obstacle.width,
        obstacle.height,
    )
}

/// Whether the player box hits any obstacle box, after shrinking both.
/// Stops at the first hit.
pub fn overlaps<I>(player: &Rect, obstacles: I) -> bool
where
    I: IntoIterator<Item = Rect>,
{
    let p = player.shrink(PLAYER_MARGINS);
    obstacles
        .into_iter()
        .any(|o| rects_overlap(&p, &o.shrink(OBSTACLE_MARGINS)))
}

//! Headless simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform code:
//! - Time comes in as raw frame timestamps, never read from a clock
//! - Seeded RNG only
//! - Geometry is queried through `GeometrySource`
//! - Rendering is reported as `GameEvent`s, never performed

pub mod clock;
pub mod collision;
pub mod field;
pub mod physics;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{Margins, Rect, obstacle_box, overlaps, player_box, rects_overlap};
pub use field::{ObstacleField, SpawnState};
pub use physics::Player;
pub use score::ScoreTracker;
pub use spawner::{Obstacle, ObstacleSpawner};
pub use state::{GameEvent, GamePhase, GameState, InputAction, Snapshot};
pub use tick::TickOutcome;

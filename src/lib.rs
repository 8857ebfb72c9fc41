//! Dino Dash - An endless side-scrolling runner
//!
//! Core modules:
//! - `sim`: Headless simulation (physics, spawning, collisions, game state)
//! - `platform`: Render/geometry contracts the host implements
//! - `settings`: Host preferences (seed, key bindings)

pub mod platform;
pub mod settings;
pub mod sim;

pub use platform::{GeometrySource, PlayArea, RenderSink, present};
pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, GameState, InputAction, Snapshot, TickOutcome};

/// Game configuration constants
///
/// All distances are in play-area pixels, with the ground line as the
/// player's vertical origin.
pub mod consts {
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = -2200.0;
    /// Upward velocity applied on jump (units/s)
    pub const JUMP_VELOCITY: f32 = 750.0;

    /// Player geometry - fixed horizontal position
    pub const PLAYER_X: f32 = 60.0;
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    /// Distance from the bottom of the play area to the ground line
    pub const GROUND_Y: f32 = 70.0;

    /// Obstacle scroll speed at score 0
    pub const BASE_SPEED: f32 = 240.0;
    /// Speed added per `SPEED_STEP_SCORE` points
    pub const SPEED_STEP: u64 = 8;
    pub const SPEED_STEP_SCORE: u64 = 5;
    /// Cap on the speed bonus over `BASE_SPEED`
    pub const MAX_SPEED_BONUS: u64 = 700;

    /// Spawn cadence (ms)
    pub const BASE_SPAWN_INTERVAL_MS: u64 = 1400;
    pub const MIN_SPAWN_INTERVAL_MS: u64 = 650;
    pub const SPAWN_INTERVAL_STEP_MS: u64 = 40;
    pub const SPAWN_INTERVAL_STEP_SCORE: u64 = 10;
    /// Chance a due spawn cycle actually produces an obstacle
    pub const SPAWN_CHANCE: f64 = 0.88;
    /// Delay before the first obstacle of a run (ms)
    pub const INITIAL_SPAWN_DELAY_MS: f32 = 800.0;

    /// Obstacle size ranges (half-open)
    pub const OBSTACLE_MIN_WIDTH: f32 = 26.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 48.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 44.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 80.0;
    /// Obstacles appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 40.0;
    /// Obstacles are destroyed once their right edge passes this x
    pub const DESPAWN_X: f32 = -60.0;

    /// Score accrued per second of game time
    pub const SCORE_RATE: f32 = 60.0;

    /// Play area used when the host does not report one
    pub const DEFAULT_AREA_WIDTH: f32 = 800.0;
    pub const DEFAULT_AREA_HEIGHT: f32 = 300.0;
}

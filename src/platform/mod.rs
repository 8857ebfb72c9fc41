//! Platform abstraction layer
//!
//! The simulation never touches the DOM. Hosts implement:
//! - `GeometrySource`: current play-area size (for spawn placement and hitboxes)
//! - `RenderSink`: receives positions, removals and score updates
//!
//! Sinks are handed full boxes (left edge, size, height above the ground
//! line) and must place visuals exactly there, so what is drawn is what the
//! hitboxes in `sim::collision` test against.
//!
//! `present` bridges the two: it replays a tick's drained events and the
//! current positions into a sink.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_AREA_HEIGHT, DEFAULT_AREA_WIDTH};
use crate::sim::{GameEvent, GameState};

/// Reports the rendered play-area size in pixels
pub trait GeometrySource {
    fn play_area_width(&self) -> f32;
    fn play_area_height(&self) -> f32;
}

/// Fixed-size play area (headless hosts and tests)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(DEFAULT_AREA_WIDTH, DEFAULT_AREA_HEIGHT)
    }
}

impl GeometrySource for PlayArea {
    fn play_area_width(&self) -> f32 {
        self.width
    }

    fn play_area_height(&self) -> f32 {
        self.height
    }
}

/// Presentation-side receiver for simulation output
pub trait RenderSink {
    /// Player box: left edge, height of its bottom above the ground line, size
    fn player_moved(&mut self, x: f32, vertical_offset: f32, width: f32, height: f32);
    /// Create or move the visual for obstacle `id` (bottom on the ground line)
    fn obstacle_moved(&mut self, id: u32, x: f32, width: f32, height: f32);
    /// Discard the visual for obstacle `id`
    fn obstacle_removed(&mut self, id: u32);
    fn score_changed(&mut self, score: u64);
    fn game_over(&mut self, final_score: u64);
    /// A new run began (hide game-over UI, refocus input)
    fn game_started(&mut self) {}
}

/// Push one frame's worth of output into `sink`
pub fn present<S: RenderSink + ?Sized>(state: &GameState, events: &[GameEvent], sink: &mut S) {
    for event in events {
        match *event {
            GameEvent::Started => sink.game_started(),
            GameEvent::ObstacleRemoved { id } => sink.obstacle_removed(id),
            GameEvent::ScoreChanged { score } => sink.score_changed(score),
            GameEvent::GameOver { final_score } => sink.game_over(final_score),
            GameEvent::ObstacleSpawned { .. } | GameEvent::Jumped => {}
        }
    }

    let player = state.player();
    sink.player_moved(player.x, player.y, player.width, player.height);
    for obstacle in state.obstacles() {
        sink.obstacle_moved(obstacle.id, obstacle.x, obstacle.width, obstacle.height);
    }
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    pub last_score: u64,
}

impl RenderSink for LogSink {
    fn player_moved(&mut self, _x: f32, vertical_offset: f32, _width: f32, _height: f32) {
        log::trace!("player y={:.1}", vertical_offset);
    }

    fn obstacle_moved(&mut self, id: u32, x: f32, width: f32, height: f32) {
        log::trace!("obstacle {} x={:.1} ({:.0}x{:.0})", id, x, width, height);
    }

    fn obstacle_removed(&mut self, id: u32) {
        log::trace!("obstacle {} removed", id);
    }

    fn score_changed(&mut self, score: u64) {
        self.last_score = score;
    }

    fn game_over(&mut self, final_score: u64) {
        self.last_score = final_score;
        log::debug!("sink: game over at {}", final_score);
    }

    fn game_started(&mut self) {
        self.last_score = 0;
        log::debug!("sink: run started");
    }
}

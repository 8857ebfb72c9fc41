//! Game state and phase transitions
//!
//! `GameState` owns every piece of simulation state. There are no globals,
//! so independent games can run side by side.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::FrameClock;
use super::field::ObstacleField;
use super::physics::Player;
use super::score::ScoreTracker;
use super::spawner::Obstacle;
use crate::consts::INITIAL_SPAWN_DELAY_MS;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first input
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended by a collision; the next jump/restart begins a new run
    GameOver,
}

/// Logical input forwarded by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAction {
    /// Jump key, tap or click
    Jump,
    /// Explicit restart (only acts on the game-over screen)
    Restart,
}

/// Things the presentation layer should know about, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Jumped,
    ObstacleSpawned { id: u32 },
    ObstacleRemoved { id: u32 },
    ScoreChanged { score: u64 },
    GameOver { final_score: u64 },
}

/// Debug view of the game, serialised for hosts and tooling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub score: u64,
    pub obstacles_count: usize,
    pub game_over: bool,
    pub game_running: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from (0 when an RNG was injected)
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    pub(crate) player: Player,
    pub(crate) field: ObstacleField,
    pub(crate) score: ScoreTracker,
    pub(crate) clock: FrameClock,
    /// Countdown (ms) to the opening obstacle of a run
    pub(crate) pending_spawn_ms: Option<f32>,
    pub(crate) final_score: Option<u64>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game whose obstacles are driven by `seed`
    pub fn new(seed: u64) -> Self {
        let mut state = Self::with_rng(Pcg32::seed_from_u64(seed));
        state.seed = seed;
        state
    }

    /// Create an idle game with an injected random source
    pub fn with_rng(rng: Pcg32) -> Self {
        Self {
            seed: 0,
            rng,
            phase: GamePhase::Idle,
            player: Player::default(),
            field: ObstacleField::new(),
            score: ScoreTracker::new(),
            clock: FrameClock::new(),
            pending_spawn_ms: None,
            final_score: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.field.obstacles()
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    /// Direct access to the obstacle field (scripted scenarios and tests)
    pub fn field_mut(&mut self) -> &mut ObstacleField {
        &mut self.field
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    /// Score the last run ended with, if it has ended
    pub fn final_score(&self) -> Option<u64> {
        self.final_score
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score(),
            obstacles_count: self.field.len(),
            game_over: self.phase == GamePhase::GameOver,
            game_running: self.phase == GamePhase::Running,
        }
    }

    /// Begin a fresh run. Ignored while a run is already in progress.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Running {
            log::debug!("start() ignored: run already in progress");
            return;
        }

        for id in self.field.clear() {
            self.events.push(GameEvent::ObstacleRemoved { id });
        }
        self.player.reset();
        self.score.reset();
        self.clock.reset();
        self.pending_spawn_ms = Some(INITIAL_SPAWN_DELAY_MS);
        self.final_score = None;
        self.phase = GamePhase::Running;

        self.events.push(GameEvent::Started);
        self.events.push(GameEvent::ScoreChanged { score: 0 });
        log::info!("Run started (seed {})", self.seed);
    }

    /// End the current run and publish the final score
    pub fn end(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        let final_score = self.score();
        self.phase = GamePhase::GameOver;
        self.final_score = Some(final_score);
        self.pending_spawn_ms = None;
        self.events.push(GameEvent::GameOver { final_score });
        log::info!("Game over - score {}", final_score);
    }

    /// Jump input. The first input of a session starts the game and jumps;
    /// on the game-over screen it only restarts.
    pub fn request_jump(&mut self) {
        match self.phase {
            GamePhase::GameOver => self.start(),
            GamePhase::Idle => {
                self.start();
                self.try_jump();
            }
            GamePhase::Running => self.try_jump(),
        }
    }

    /// Restart input. Only meaningful on the game-over screen.
    pub fn request_restart(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.start();
        }
    }

    pub fn apply_input(&mut self, action: InputAction) {
        match action {
            InputAction::Jump => self.request_jump(),
            InputAction::Restart => self.request_restart(),
        }
    }

    fn try_jump(&mut self) {
        if self.player.jump() {
            self.events.push(GameEvent::Jumped);
        }
    }
}

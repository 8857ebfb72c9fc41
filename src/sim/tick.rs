//! Per-frame simulation tick
//!
//! One call per display refresh. Every subsystem sees the same delta time
//! and the whole update finishes before the host regains control.

use super::collision::{obstacle_box, overlaps, player_box};
use super::state::{GameEvent, GameState};
use crate::platform::GeometrySource;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Stop,
}

impl TickOutcome {
    pub fn should_continue(self) -> bool {
        self == TickOutcome::Continue
    }
}

impl GameState {
    /// Advance the game to frame timestamp `now_ms`.
    ///
    /// Order: clock, player physics, obstacle scroll, spawn timer, opening
    /// spawn, score, collision. Outside the Running phase nothing changes
    /// and `Stop` is returned.
    ///
    /// Events queue up until `drain_events`; hosts drain once per frame.
    /// `ScoreChanged` is only queued when the score actually moved.
    pub fn tick<G: GeometrySource + ?Sized>(&mut self, now_ms: f64, geometry: &G) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Stop;
        }

        let dt = self.clock.tick(now_ms);
        let area_width = geometry.play_area_width();
        let area_height = geometry.play_area_height();

        self.player.integrate(dt);

        for id in self.field.advance(dt) {
            self.events.push(GameEvent::ObstacleRemoved { id });
        }

        let score = self.score.score();
        if let Some(id) = self.field.maybe_spawn(dt, score, area_width, &mut self.rng) {
            self.events.push(GameEvent::ObstacleSpawned { id });
        }

        if let Some(remaining) = self.pending_spawn_ms {
            let remaining = remaining - dt * 1000.0;
            if remaining <= 0.0 {
                self.pending_spawn_ms = None;
                let id = self.field.spawn_now(score, area_width, &mut self.rng);
                self.events.push(GameEvent::ObstacleSpawned { id });
            } else {
                self.pending_spawn_ms = Some(remaining);
            }
        }

        let total = self.score.accumulate(dt);
        if total != score {
            self.events.push(GameEvent::ScoreChanged { score: total });
        }

        let player = player_box(&self.player, area_height);
        let hit = overlaps(
            &player,
            self.field.obstacles().iter().map(|o| obstacle_box(o, area_height)),
        );
        if hit {
            self.end();
            return TickOutcome::Stop;
        }

        TickOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlayArea;
    use crate::sim::{GamePhase, Obstacle};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[test]
    fn test_tick_while_idle_is_noop() {
        let mut state = GameState::new(1);
        assert_eq!(state.tick(0.0, &PlayArea::default()), TickOutcome::Stop);
        assert_eq!(state.phase(), GamePhase::Idle);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_first_tick_has_zero_delta() {
        let mut state = GameState::new(1);
        state.request_jump();
        let before = state.player().clone();

        state.tick(5_000.0, &PlayArea::default());
        assert_eq!(state.player(), &before);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_opening_obstacle_spawns_and_scrolls() {
        let area = PlayArea::default();
        let mut state = GameState::new(12345);
        state.start();

        let mut now = 0.0;
        let mut ticks = 0;
        while state.obstacles().is_empty() && ticks < 120 {
            assert_eq!(state.tick(now, &area), TickOutcome::Continue);
            now += FRAME_MS;
            ticks += 1;
        }
        assert!(!state.obstacles().is_empty(), "no obstacle after {ticks} ticks");
        // 800ms at 60 fps, plus the zero-length first frame
        assert!((48..=52).contains(&ticks), "spawned after {ticks} ticks");

        let id = state.obstacles()[0].id;
        let mut last_x = state.obstacles()[0].x;
        for _ in 0..10 {
            state.tick(now, &area);
            now += FRAME_MS;
            let obstacle = state.obstacles().iter().find(|o| o.id == id).unwrap();
            assert!(obstacle.x < last_x);
            last_x = obstacle.x;
        }
    }

    #[test]
    fn test_collision_ends_run_and_freezes_score() {
        let area = PlayArea::default();
        let mut state = GameState::new(7);
        state.start();

        // Shrunk player right edge is 60 + 64 - 6 = 118; the obstacle's
        // shrunk left edge reaches it after 0.1s at 240/s.
        state.field.insert(Obstacle {
            id: 0,
            x: 136.0,
            width: 30.0,
            height: 50.0,
            speed: 240.0,
        });

        assert_eq!(state.tick(1000.0, &area), TickOutcome::Continue);
        assert_eq!(state.phase(), GamePhase::Running);

        assert_eq!(state.tick(1100.0, &area), TickOutcome::Stop);
        assert_eq!(state.phase(), GamePhase::GameOver);
        let frozen = state.score();
        assert_eq!(frozen, 6);
        assert_eq!(state.final_score(), Some(frozen));

        assert_eq!(state.tick(1200.0, &area), TickOutcome::Stop);
        assert_eq!(state.tick(5000.0, &area), TickOutcome::Stop);
        assert_eq!(state.score(), frozen);
    }

    #[test]
    fn test_jump_clears_low_obstacle() {
        let area = PlayArea::default();
        let mut state = GameState::new(7);
        state.start();
        let id = state.field.insert(Obstacle {
            id: 0,
            x: 300.0,
            width: 26.0,
            height: 44.0,
            speed: 240.0,
        });

        let mut now = 0.0;
        state.tick(now, &area);
        let mut jumped = false;
        loop {
            let Some(obstacle) = state.obstacles().iter().find(|o| o.id == id) else {
                break;
            };
            if obstacle.right() < state.player().x {
                break;
            }
            if obstacle.x < 160.0 && !jumped {
                state.request_jump();
                jumped = true;
            }
            now += FRAME_MS;
            assert_eq!(state.tick(now, &area), TickOutcome::Continue);
        }
        assert!(jumped);
        assert_eq!(state.phase(), GamePhase::Running);
    }

    #[test]
    fn test_no_jumping_eventually_collides() {
        let area = PlayArea::default();
        let mut state = GameState::new(99);
        state.start();

        let mut now = 0.0;
        let mut frames = 0;
        while state.tick(now, &area).should_continue() {
            now += FRAME_MS;
            frames += 1;
            assert!(frames < 60 * 10, "never collided");
        }
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert!(state.final_score().is_some());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let area = PlayArea::default();
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.start();
        state2.start();

        let mut now = 0.0;
        for _ in 0..240 {
            state1.tick(now, &area);
            state2.tick(now, &area);
            now += FRAME_MS;
        }

        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.obstacles(), state2.obstacles());
        assert_eq!(state1.drain_events(), state2.drain_events());
    }

    #[test]
    fn test_restart_rebaselines_clock() {
        let area = PlayArea::default();
        let mut state = GameState::new(3);
        state.start();
        state.tick(0.0, &area);
        state.tick(100.0, &area);
        state.end();

        // A long pause on the game-over screen must not leak into the new run
        state.request_jump();
        state.tick(60_000.0, &area);
        assert_eq!(state.score(), 0);
        assert!(state.obstacles().is_empty());
    }

    #[test]
    fn test_zero_sized_area_does_not_panic() {
        let area = PlayArea::new(0.0, 0.0);
        let mut state = GameState::new(4);
        state.start();
        let mut now = 0.0;
        for _ in 0..200 {
            if !state.tick(now, &area).should_continue() {
                break;
            }
            now += FRAME_MS;
        }
    }

    #[test]
    fn test_score_event_only_on_change() {
        let area = PlayArea::default();
        let mut state = GameState::new(8);
        state.start();
        state.drain_events();

        // Zero-length first frame, then 8ms (floor(0.48) = 0)
        state.tick(1000.0, &area);
        state.tick(1008.0, &area);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::ScoreChanged { .. }))
        );

        state.tick(1258.0, &area);
        assert_eq!(state.score(), 15);
        assert_eq!(state.drain_events(), vec![GameEvent::ScoreChanged { score: 15 }]);
    }

    #[test]
    fn test_end_cancels_opening_spawn_and_restart_rearms_it() {
        let area = PlayArea::default();
        let mut state = GameState::new(31);
        state.start();

        let mut now = 0.0;
        while now <= 400.0 {
            state.tick(now, &area);
            now += FRAME_MS;
        }
        assert!(state.obstacles().is_empty());

        state.end();
        state.request_jump();
        assert_eq!(state.phase(), GamePhase::Running);
        state.drain_events();

        // The old countdown had under 400ms left; it must not fire here
        let restart = now;
        while now - restart <= 500.0 {
            assert_eq!(state.tick(now, &area), TickOutcome::Continue);
            now += FRAME_MS;
        }
        assert!(state.obstacles().is_empty());

        while now - restart <= 900.0 {
            assert_eq!(state.tick(now, &area), TickOutcome::Continue);
            now += FRAME_MS;
        }
        let spawned = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
            .count();
        assert_eq!(spawned, 1);
        assert_eq!(state.obstacles().len(), 1);
    }
}

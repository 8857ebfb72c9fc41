//! Live obstacle set and spawn cadence

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::spawner::{Obstacle, ObstacleSpawner};
use crate::consts::*;

/// Spawn timer state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnState {
    /// Milliseconds accumulated since the last spawn opportunity
    pub timer_ms: f32,
    /// Milliseconds required before the next opportunity
    pub interval_ms: f32,
}

impl Default for SpawnState {
    fn default() -> Self {
        Self {
            timer_ms: 0.0,
            interval_ms: BASE_SPAWN_INTERVAL_MS as f32,
        }
    }
}

/// Owns every live obstacle, in spawn order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    pub spawn: SpawnState,
    spawner: ObstacleSpawner,
    next_id: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            spawn: SpawnState::default(),
            spawner: ObstacleSpawner,
            next_id: 1,
        }
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Insert a pre-built obstacle (ids are reassigned to stay unique)
    pub fn insert(&mut self, mut obstacle: Obstacle) -> u32 {
        obstacle.id = self.allocate_id();
        let id = obstacle.id;
        self.obstacles.push(obstacle);
        id
    }

    /// Destroy all obstacles and reset the spawn timer.
    /// Returns the ids that were removed so their visuals can be dropped.
    pub fn clear(&mut self) -> Vec<u32> {
        let removed = self.obstacles.drain(..).map(|o| o.id).collect();
        self.spawn = SpawnState::default();
        removed
    }

    /// Scroll every obstacle left by `speed * dt` and drop the ones
    /// that have left the play area. Returns the removed ids.
    pub fn advance(&mut self, dt: f32) -> Vec<u32> {
        let mut removed = Vec::new();
        self.obstacles.retain_mut(|obstacle| {
            obstacle.x -= obstacle.speed * dt;
            if obstacle.is_offscreen() {
                removed.push(obstacle.id);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Run the spawn timer for `dt` seconds.
    ///
    /// Each time the interval elapses the timer restarts and a spawn is
    /// rolled with `SPAWN_CHANCE`; the interval is then recomputed from
    /// `score` whether or not anything spawned.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        dt: f32,
        score: u64,
        area_width: f32,
        rng: &mut R,
    ) -> Option<u32> {
        self.spawn.timer_ms += dt * 1000.0;
        if self.spawn.timer_ms < self.spawn.interval_ms {
            return None;
        }

        self.spawn.timer_ms = 0.0;
        let spawned = if rng.random_bool(SPAWN_CHANCE) {
            Some(self.spawn_now(score, area_width, rng))
        } else {
            log::debug!("Spawn cycle skipped at score {}", score);
            None
        };
        self.spawn.interval_ms = ObstacleSpawner::compute_spawn_interval(score);
        spawned
    }

    /// Unconditionally spawn one obstacle (used for the opening obstacle)
    pub fn spawn_now<R: Rng>(&mut self, score: u64, area_width: f32, rng: &mut R) -> u32 {
        let id = self.allocate_id();
        let obstacle = self.spawner.spawn(id, score, area_width, rng);
        log::debug!(
            "Spawned obstacle {} ({:.0}x{:.0}) at speed {}",
            id,
            obstacle.width,
            obstacle.height,
            obstacle.speed
        );
        self.obstacles.push(obstacle);
        self.spawn.interval_ms = ObstacleSpawner::compute_spawn_interval(score);
        id
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn obstacle(x: f32, width: f32, speed: f32) -> Obstacle {
        Obstacle { id: 0, x, width, height: 50.0, speed }
    }

    #[test]
    fn test_advance_moves_left() {
        let mut field = ObstacleField::new();
        field.insert(obstacle(500.0, 30.0, 300.0));

        let removed = field.advance(0.5);
        assert!(removed.is_empty());
        assert_eq!(field.obstacles()[0].x, 350.0);
    }

    #[test]
    fn test_advance_removes_adjacent_offscreen_obstacles() {
        let mut field = ObstacleField::new();
        let a = field.insert(obstacle(-95.0, 30.0, 100.0));
        let b = field.insert(obstacle(-95.0, 30.0, 100.0));
        let c = field.insert(obstacle(200.0, 30.0, 100.0));

        // a and b: right edge moves from -65 to -75
        let removed = field.advance(0.1);
        assert_eq!(removed, vec![a, b]);
        assert_eq!(field.len(), 1);
        assert_eq!(field.obstacles()[0].id, c);
    }

    #[test]
    fn test_removed_obstacles_stay_removed() {
        let mut field = ObstacleField::new();
        field.insert(obstacle(-200.0, 30.0, 240.0));
        field.advance(0.016);
        assert!(field.is_empty());
        field.advance(-10.0);
        assert!(field.is_empty());
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(1);

        // 1.3s in 100ms steps stays under the 1400ms interval
        for _ in 0..13 {
            assert_eq!(field.maybe_spawn(0.1, 0, 800.0, &mut rng), None);
        }
        assert!(field.is_empty());
        assert!((field.spawn.timer_ms - 1300.0).abs() < 0.01);
    }

    #[test]
    fn test_due_cycle_resets_timer_and_recomputes_interval() {
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(1);

        field.maybe_spawn(1.5, 100, 800.0, &mut rng);
        assert_eq!(field.spawn.timer_ms, 0.0);
        assert_eq!(field.spawn.interval_ms, 1000.0);
    }

    #[test]
    fn test_spawn_rate_matches_chance() {
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(2024);

        let cycles = 2000;
        let spawned = (0..cycles)
            .filter_map(|_| field.maybe_spawn(1.5, 0, 800.0, &mut rng))
            .count();

        let rate = spawned as f64 / cycles as f64;
        assert!((0.84..0.92).contains(&rate), "rate was {rate}");
        assert_eq!(field.len(), spawned);
    }

    #[test]
    fn test_clear_returns_ids_and_resets_timer() {
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(3);
        let a = field.spawn_now(0, 800.0, &mut rng);
        let b = field.spawn_now(0, 800.0, &mut rng);
        field.spawn.timer_ms = 900.0;
        field.spawn.interval_ms = 650.0;

        assert_eq!(field.clear(), vec![a, b]);
        assert!(field.is_empty());
        assert_eq!(field.spawn, SpawnState::default());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(9);
        let a = field.spawn_now(0, 800.0, &mut rng);
        field.clear();
        let b = field.spawn_now(0, 800.0, &mut rng);
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn prop_advance_removes_iff_past_threshold(
            xs in proptest::collection::vec(-300.0f32..900.0, 0..16),
            width in 26.0f32..48.0,
            speed in 240.0f32..940.0,
            dt in 0.0f32..0.25,
        ) {
            let mut field = ObstacleField::new();
            for &x in &xs {
                field.insert(obstacle(x, width, speed));
            }

            let expected_kept = xs
                .iter()
                .filter(|&&x| (x - speed * dt) + width >= DESPAWN_X)
                .count();

            let removed = field.advance(dt);
            prop_assert_eq!(field.len(), expected_kept);
            prop_assert_eq!(removed.len(), xs.len() - expected_kept);
            prop_assert!(field.obstacles().iter().all(|o| o.right() >= DESPAWN_X));
        }
    }
}

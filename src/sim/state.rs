//! Game state and core simulation types
//!
//! One owned [`GameState`] holds everything that changes during play. The
//! renderer reads it through accessors and drains [`GameEvent`]s; only the
//! tick mutates bomb positions.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::difficulty::Difficulty;
use super::emitter::Emitter;
use crate::clamp_to_bounds;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen by the player; nothing moves or spawns
    Paused,
    /// Out of lives; waiting for a reset
    GameOver,
}

/// Something the renderer/audio layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New bomb dropped by the boss
    Spawned { id: u32, pos: Vec2 },
    /// Bomb landed on the paddle
    Catch { id: u32, pos: Vec2 },
    /// Bomb hit the floor (explosion at `pos`)
    Miss { id: u32, pos: Vec2 },
    /// Gravity was raised by the difficulty timer
    DifficultyRaised { gravity: f32 },
    Paused,
    Resumed,
    GameOver { score: u64 },
    Reset,
}

/// The player's paddle (moves horizontally only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.center_x(), tuning.paddle_y),
            size: Vec2::new(tuning.paddle_width, tuning.paddle_height),
        }
    }

    pub fn half_width(&self) -> f32 {
        self.size.x * 0.5
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// A falling bomb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Position at the start of the current tick (for swept collision)
    #[serde(skip)]
    pub prev_pos: Vec2,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size,
            prev_pos: pos,
        }
    }

    /// Semi-implicit Euler step under downward `accel`
    pub fn integrate(&mut self, accel: f32, dt: f32) {
        self.prev_pos = self.pos;
        self.vel.y -= accel * dt;
        self.pos += self.vel * dt;
    }
}

/// Read-only view of a bomb for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Serializable picture of the game for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub paddle: Vec2,
    pub emitter: Vec2,
    pub projectiles: Vec<ProjectileView>,
    pub spawn_interval: f32,
    pub batch_size: u32,
    pub gravity: f32,
    pub elapsed: f32,
    pub restart_available: bool,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) tuning: Tuning,
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    pub(crate) score: u64,
    pub(crate) lives: u8,
    /// Simulated running time in seconds (excludes paused time)
    pub(crate) elapsed: f32,
    pub(crate) paddle: Paddle,
    pub(crate) emitter: Emitter,
    /// Live bombs, ascending by id
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) difficulty: Difficulty,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), seed)
    }

    /// Create a new game with custom balance. Rejects tuning that fails
    /// [`Tuning::validate`].
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            lives: tuning.starting_lives,
            elapsed: 0.0,
            paddle: Paddle::new(&tuning),
            emitter: Emitter::new(&tuning),
            projectiles: Vec::new(),
            difficulty: Difficulty::new(&tuning),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop a bomb at `pos`, returning its id
    pub(crate) fn spawn_projectile(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let size = Vec2::splat(self.tuning.bomb_size);
        self.projectiles.push(Projectile::new(id, pos, size));
        self.events.push(GameEvent::Spawned { id, pos });
        id
    }

    /// Advance the simulation by `dt` seconds (no-op unless running)
    pub fn update(&mut self, dt: f32) {
        super::tick::advance(self, dt);
    }

    /// Move the paddle to `x`, clamped to the playfield. Ignored unless running.
    pub fn set_paddle_x(&mut self, x: f32) {
        if self.phase != GamePhase::Running || !x.is_finite() {
            return;
        }
        self.paddle.pos.x = clamp_to_bounds(
            x,
            self.paddle.half_width(),
            0.0,
            self.tuning.playfield_width,
        );
    }

    /// Running <-> Paused. Does nothing after game over.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                log::info!("Paused at {:.2}s", self.elapsed);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Resumed);
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    /// Start over from any phase: fresh score, lives, difficulty, boss and
    /// paddle, no bombs. Entity ids keep increasing across resets.
    pub fn reset_game(&mut self) {
        let cleared = self.projectiles.len();
        self.projectiles.clear();
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.elapsed = 0.0;
        self.difficulty = Difficulty::new(&self.tuning);
        self.emitter = Emitter::new(&self.tuning);
        self.paddle = Paddle::new(&self.tuning);
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Reset);
        log::info!("Game reset ({} bombs cleared)", cleared);
    }

    /// Take all events produced since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// True once the run has ended and a reset is the only way forward
    pub fn restart_available(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn paddle_position(&self) -> Vec2 {
        self.paddle.pos
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn emitter_position(&self) -> Vec2 {
        self.emitter.pos
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    /// Live bombs in ascending id order
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            paddle: self.paddle.pos,
            emitter: self.emitter.pos,
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    pos: p.pos,
                    size: p.size,
                })
                .collect(),
            spawn_interval: self.difficulty.spawn_interval,
            batch_size: self.difficulty.batch_size,
            gravity: self.difficulty.gravity,
            elapsed: self.elapsed,
            restart_available: self.restart_available(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), 3);
        assert!(state.projectiles().is_empty());
        assert!(!state.restart_available());
        assert_eq!(state.paddle_position(), Vec2::new(195.0, 50.0));
        assert_eq!(state.emitter_position(), Vec2::new(195.0, 694.0));
    }

    #[test]
    fn test_paddle_clamps_to_playfield() {
        let mut state = GameState::new(7);
        state.set_paddle_x(-500.0);
        assert_eq!(state.paddle_position().x, 50.0);
        state.set_paddle_x(10_000.0);
        assert_eq!(state.paddle_position().x, 340.0);
        state.set_paddle_x(200.0);
        assert_eq!(state.paddle_position().x, 200.0);
    }

    #[test]
    fn test_paddle_ignores_nan() {
        let mut state = GameState::new(7);
        state.set_paddle_x(f32::NAN);
        assert_eq!(state.paddle_position().x, 195.0);
    }

    #[test]
    fn test_paddle_ignored_while_paused() {
        let mut state = GameState::new(7);
        state.toggle_pause();
        state.set_paddle_x(100.0);
        assert_eq!(state.paddle_position().x, 195.0);
    }

    #[test]
    fn test_toggle_pause_round_trip() {
        let mut state = GameState::new(7);
        state.toggle_pause();
        assert_eq!(state.phase(), GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Paused, GameEvent::Resumed]
        );
    }

    #[test]
    fn test_toggle_pause_noop_after_game_over() {
        let mut state = GameState::new(7);
        state.phase = GamePhase::GameOver;
        state.toggle_pause();
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = GameState::new(7);
        state.spawn_projectile(Vec2::new(100.0, 400.0));
        state.score = 120;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        state.difficulty.batch_size = 3;
        state.emitter.pos.x = 60.0;
        state.paddle.pos.x = 300.0;

        state.reset_game();

        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), 3);
        assert!(state.projectiles().is_empty());
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.difficulty(), &Difficulty::new(state.tuning()));
        assert_eq!(state.emitter_position().x, 195.0);
        assert_eq!(state.paddle_position().x, 195.0);
        assert_eq!(state.drain_events().last(), Some(&GameEvent::Reset));
    }

    #[test]
    fn test_reset_is_idempotent_from_any_phase() {
        let mut state = GameState::new(7);
        state.toggle_pause();
        state.reset_game();
        state.reset_game();
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.lives(), 3);
    }

    #[test]
    fn test_ids_stay_unique_across_reset() {
        let mut state = GameState::new(7);
        let a = state.spawn_projectile(Vec2::new(100.0, 400.0));
        state.reset_game();
        let b = state.spawn_projectile(Vec2::new(100.0, 400.0));
        assert!(b > a);
    }

    #[test]
    fn test_with_tuning_rejects_invalid_balance() {
        let zero_floor = Tuning {
            initial_difficulty_interval: 1.0,
            min_difficulty_interval: 0.0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::with_tuning(zero_floor, 1),
            Err(TuningError::Invalid { field: "min_difficulty_interval", .. })
        ));

        let inverted_cap = Tuning {
            initial_gravity: 5.0,
            max_gravity: 2.0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::with_tuning(inverted_cap, 1),
            Err(TuningError::Invalid { field: "max_gravity", .. })
        ));

        let bad_jitter = Tuning {
            spawn_jitter: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(GameState::with_tuning(bad_jitter, 1).is_err());
    }

    #[test]
    fn test_with_tuning_accepts_valid_balance() {
        let tuning = Tuning {
            max_batch: 5,
            ..Tuning::default()
        };
        let state = GameState::with_tuning(tuning, 1).unwrap();
        assert_eq!(state.tuning().max_batch, 5);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(7);
        let id = state.spawn_projectile(Vec2::new(120.0, 300.0));
        let snap = state.snapshot();
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.projectiles.len(), 1);
        assert_eq!(snap.projectiles[0].id, id);
        assert_eq!(snap.projectiles[0].size, Vec2::splat(70.0));

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
    }

    #[test]
    fn test_integrate_accelerates_downward() {
        let mut p = Projectile::new(1, Vec2::new(0.0, 100.0), Vec2::splat(10.0));
        p.integrate(150.0, 0.1);
        assert!((p.vel.y + 15.0).abs() < 1e-4);
        assert!((p.pos.y - 98.5).abs() < 1e-4);
        assert_eq!(p.prev_pos, Vec2::new(0.0, 100.0));
    }
}

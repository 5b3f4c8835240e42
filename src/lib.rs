//! Bomb Catcher - a catch-the-falling-bombs arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, game state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (points, origin bottom-left)
    pub const PLAYFIELD_WIDTH: f32 = 390.0;
    pub const PLAYFIELD_HEIGHT: f32 = 844.0;
    /// A bomb whose centre drops below this line is missed
    pub const FLOOR_Y: f32 = 0.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_Y: f32 = 50.0;
    /// Demo AI paddle speed (points/s)
    pub const AUTOPILOT_SPEED: f32 = 600.0;

    /// Bomb (projectile) size, square
    pub const BOMB_SIZE: f32 = 70.0;

    /// Boss (emitter) defaults
    pub const BOSS_SIZE: f32 = 100.0;
    /// Distance of the boss below the top of the playfield
    pub const BOSS_TOP_OFFSET: f32 = 150.0;
    /// Bombs appear this far below the boss centre
    pub const BOSS_DROP_OFFSET: f32 = 50.0;
    /// Seconds for a full bound-to-bound sweep
    pub const BOSS_MOVE_DURATION: f32 = 4.0;
    /// Seconds the boss rests at each bound
    pub const BOSS_DWELL: f32 = 1.0;

    /// Scoring and lives
    pub const STARTING_LIVES: u8 = 3;
    pub const CATCH_SCORE: u64 = 10;

    /// Spawn schedule
    pub const INITIAL_SPAWN_INTERVAL: f32 = 1.5;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.05;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.5;
    pub const INITIAL_BATCH: u32 = 1;
    pub const MAX_BATCH: u32 = 3;

    /// Gravity (in world units; multiplied by GRAVITY_SCALE for points/s²)
    pub const INITIAL_GRAVITY: f32 = 1.0;
    pub const GRAVITY_SCALE: f32 = 150.0;
    pub const GRAVITY_STEP: f32 = 0.1;
    pub const MAX_GRAVITY: f32 = 6.0;

    /// Difficulty timer
    pub const INITIAL_DIFFICULTY_INTERVAL: f32 = 15.0;
    pub const DIFFICULTY_INTERVAL_STEP: f32 = 1.0;
    pub const MIN_DIFFICULTY_INTERVAL: f32 = 5.0;
}

/// Clamp `x` so a body of `half_width` stays inside `[left, right]`.
///
/// If the body is wider than the range, it is pinned to the centre.
#[inline]
pub fn clamp_to_bounds(x: f32, half_width: f32, left: f32, right: f32) -> f32 {
    let lo = left + half_width;
    let hi = right - half_width;
    if lo > hi {
        return (left + right) * 0.5;
    }
    x.clamp(lo, hi)
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulated time only (timers accumulate `dt`, never wall-clock)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod emitter;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Fate, Partition, classify, partition};
pub use difficulty::Difficulty;
pub use emitter::{Emitter, EmitterMotion};
pub use state::{
    GameEvent, GamePhase, GameState, Paddle, Projectile, ProjectileView, Snapshot,
};
pub use tick::{TickInput, advance, tick};

//! Simulation tick
//!
//! Core game loop that advances the simulation. Order within one running
//! tick: boss moves, bombs fall, catches/misses resolve, then the spawn and
//! difficulty timers fire. Bombs dropped this tick start falling next tick.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::state::{GameEvent, GamePhase, GameState};
use crate::clamp_to_bounds;
use crate::consts::{AUTOPILOT_SPEED, FLOOR_Y};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Target paddle x (from mouse/touch position)
    pub paddle_x: Option<f32>,
    /// Pause toggle
    pub pause: bool,
    /// Restart ("Ready Again?")
    pub reset: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Apply one frame of input, then advance the game by `dt`
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.reset {
        state.reset_game();
    }
    if input.pause {
        state.toggle_pause();
    }

    if state.phase != GamePhase::Running {
        return;
    }

    if input.idle_mode {
        if let Some(x) = autopilot_target(state, dt) {
            state.set_paddle_x(x);
        }
    } else if let Some(x) = input.paddle_x {
        state.set_paddle_x(x);
    }

    advance(state, dt);
}

/// Advance the simulation by `dt` seconds. No-op unless running.
pub fn advance(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Running || !dt.is_finite() || dt <= 0.0 {
        return;
    }

    state.elapsed += dt;
    state.emitter.advance(dt);

    let accel = state.difficulty.gravity * state.tuning.gravity_scale;
    for projectile in &mut state.projectiles {
        projectile.integrate(accel, dt);
    }

    resolve_collisions(state);

    // Game over freezes spawning and difficulty in the same tick
    if state.phase != GamePhase::Running {
        return;
    }

    state.difficulty.accumulate(dt);
    spawn_due(state);
    raise_due(state);
}

/// Remove caught and missed bombs, updating score, lives and phase
fn resolve_collisions(state: &mut GameState) {
    let paddle_box = state.paddle.aabb();
    let partition = collision::partition(&state.projectiles, &paddle_box, FLOOR_Y);
    if partition.is_empty() {
        return;
    }

    let mut removed = vec![false; state.projectiles.len()];

    for &idx in &partition.caught {
        assert!(!removed[idx], "bomb removed twice in one tick");
        removed[idx] = true;

        let bomb = &state.projectiles[idx];
        state.score += state.tuning.catch_score;
        state.events.push(GameEvent::Catch {
            id: bomb.id,
            pos: bomb.pos,
        });
        log::debug!("Caught bomb {} (score {})", bomb.id, state.score);
    }

    for &idx in &partition.missed {
        assert!(!removed[idx], "bomb removed twice in one tick");
        removed[idx] = true;

        let bomb = &state.projectiles[idx];
        if state.phase == GamePhase::GameOver {
            // Already lost this tick; the rest are swept away silently
            log::debug!("Discarding bomb {} after game over", bomb.id);
            continue;
        }

        assert!(state.lives > 0, "lives underflow while running");
        state.lives -= 1;
        state.events.push(GameEvent::Miss {
            id: bomb.id,
            pos: bomb.pos,
        });
        log::debug!("Missed bomb {} ({} lives left)", bomb.id, state.lives);

        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver { score: state.score });
            log::info!(
                "Game over: score {} after {:.1}s",
                state.score,
                state.elapsed
            );
        }
    }

    let mut idx = 0;
    state.projectiles.retain(|_| {
        let keep = !removed[idx];
        idx += 1;
        keep
    });
}

/// Fire every spawn event the timer has reached
fn spawn_due(state: &mut GameState) {
    while let Some(batch) = state.difficulty.next_spawn(&state.tuning) {
        // One anchor read per spawn event
        let anchor = state.emitter.spawn_anchor();
        let half = state.tuning.bomb_size * 0.5;
        let jitter = state.tuning.spawn_jitter;

        for _ in 0..batch {
            let offset = if jitter.is_finite() && jitter > 0.0 {
                state.rng.random_range(-jitter..=jitter)
            } else {
                0.0
            };
            let x = clamp_to_bounds(anchor.x + offset, half, 0.0, state.tuning.playfield_width);
            state.spawn_projectile(Vec2::new(x, anchor.y));
        }

        log::debug!(
            "Spawned {} bomb(s) at x={:.1}; next interval {:.2}s",
            batch,
            anchor.x,
            state.difficulty.spawn_interval
        );
    }
}

/// Fire every gravity raise the difficulty timer has reached
fn raise_due(state: &mut GameState) {
    while let Some(gravity) = state.difficulty.next_raise(&state.tuning) {
        state.events.push(GameEvent::DifficultyRaised { gravity });
        log::info!(
            "Difficulty up: gravity {:.2}, next raise in {:.0}s",
            gravity,
            state.difficulty.difficulty_interval
        );
    }
}

/// Where the demo AI wants the paddle this frame.
///
/// Chases the bomb closest to the paddle line, limited to a finite speed so
/// it can still be beaten by a fast batch.
fn autopilot_target(state: &GameState, dt: f32) -> Option<f32> {
    let paddle_y = state.paddle.pos.y;
    let target = state
        .projectiles
        .iter()
        .filter(|p| p.pos.y >= paddle_y)
        .min_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.pos.x)?;

    let current = state.paddle.pos.x;
    let max_step = AUTOPILOT_SPEED * dt.max(0.0);
    Some(current + (target - current).clamp(-max_step, max_step))
}

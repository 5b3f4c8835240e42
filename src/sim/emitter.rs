//! The boss: a bomb emitter sweeping back and forth along the top
//!
//! Motion is a deterministic ping-pong between the left and right bounds,
//! resting for a fixed dwell at each end. Leftover time after an arrival
//! carries into the next phase, so one large `dt` lands in the same place as
//! many small ones.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// What the emitter is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EmitterMotion {
    /// Sliding toward a bound; `dir` is -1.0 (left) or 1.0 (right)
    Moving { dir: f32 },
    /// Resting at a bound before heading off in `next_dir`
    Dwelling { remaining: f32, next_dir: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emitter {
    pub pos: Vec2,
    pub size: Vec2,
    pub motion: EmitterMotion,
    /// Leftmost centre position
    min_x: f32,
    /// Rightmost centre position
    max_x: f32,
    /// Points per second
    speed: f32,
    dwell: f32,
    drop_offset: f32,
}

impl Emitter {
    /// Emitter at the top centre of the playfield, heading left
    pub fn new(tuning: &Tuning) -> Self {
        let half = tuning.boss_size * 0.5;
        let center = tuning.center_x();
        let (min_x, max_x) = if 2.0 * half > tuning.playfield_width {
            // Wider than the playfield: no room to move
            (center, center)
        } else {
            (half, tuning.playfield_width - half)
        };

        Self {
            pos: Vec2::new(center, tuning.boss_y()),
            size: Vec2::splat(tuning.boss_size),
            motion: EmitterMotion::Moving { dir: -1.0 },
            min_x,
            max_x,
            speed: (max_x - min_x) / tuning.boss_move_duration,
            dwell: tuning.boss_dwell,
            drop_offset: tuning.boss_drop_offset,
        }
    }

    /// Horizontal range the emitter centre travels in
    pub fn bounds(&self) -> (f32, f32) {
        (self.min_x, self.max_x)
    }

    /// Where a spawned bomb appears: directly beneath the emitter
    pub fn spawn_anchor(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.drop_offset)
    }

    /// Move along the sweep path by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if self.speed <= 0.0 {
            return;
        }

        // Knocked outside the path: head back toward the interior at once
        if self.pos.x < self.min_x {
            self.motion = EmitterMotion::Moving { dir: 1.0 };
        } else if self.pos.x > self.max_x {
            self.motion = EmitterMotion::Moving { dir: -1.0 };
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            match self.motion {
                EmitterMotion::Moving { dir } => {
                    let target = if dir > 0.0 { self.max_x } else { self.min_x };
                    let distance = ((target - self.pos.x) * dir).max(0.0);
                    let time_to_target = distance / self.speed;

                    if remaining < time_to_target {
                        let x = self.pos.x + dir * self.speed * remaining;
                        // Rounding must never carry us past the bound
                        self.pos.x = if dir > 0.0 { x.min(target) } else { x.max(target) };
                        remaining = 0.0;
                    } else {
                        self.pos.x = target;
                        remaining -= time_to_target;
                        self.motion = EmitterMotion::Dwelling {
                            remaining: self.dwell,
                            next_dir: -dir,
                        };
                    }
                }
                EmitterMotion::Dwelling {
                    remaining: rest,
                    next_dir,
                } => {
                    if remaining < rest {
                        self.motion = EmitterMotion::Dwelling {
                            remaining: rest - remaining,
                            next_dir,
                        };
                        remaining = 0.0;
                    } else {
                        remaining -= rest;
                        self.motion = EmitterMotion::Moving { dir: next_dir };
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitter() -> Emitter {
        Emitter::new(&Tuning::default())
    }

    #[test]
    fn test_starts_centered_heading_left() {
        let e = emitter();
        let tuning = Tuning::default();
        assert_eq!(e.pos.x, tuning.center_x());
        assert_eq!(e.motion, EmitterMotion::Moving { dir: -1.0 });
        assert_eq!(e.bounds(), (50.0, 340.0));
    }

    #[test]
    fn test_full_sweep_takes_move_duration() {
        let mut e = emitter();
        // Centre to left bound is half a sweep
        e.advance(2.0);
        assert!((e.pos.x - 50.0).abs() < 1e-3);
        assert!(matches!(e.motion, EmitterMotion::Dwelling { .. }));

        // Dwell, then a full sweep right
        e.advance(1.0);
        assert_eq!(e.motion, EmitterMotion::Moving { dir: 1.0 });
        e.advance(4.0);
        assert!((e.pos.x - 340.0).abs() < 1e-3);
    }

    #[test]
    fn test_dwell_holds_position() {
        let mut e = emitter();
        e.advance(2.0);
        let rest = e.pos.x;
        e.advance(0.5);
        assert_eq!(e.pos.x, rest);
    }

    #[test]
    fn test_large_step_matches_small_steps() {
        let mut coarse = emitter();
        let mut fine = emitter();
        coarse.advance(9.3);
        for _ in 0..93 {
            fine.advance(0.1);
        }
        assert!((coarse.pos.x - fine.pos.x).abs() < 0.05);
    }

    #[test]
    fn test_never_leaves_bounds() {
        let mut e = emitter();
        let (lo, hi) = e.bounds();
        for _ in 0..5000 {
            e.advance(0.013);
            assert!(e.pos.x >= lo && e.pos.x <= hi);
        }
    }

    #[test]
    fn test_outside_bounds_reverses_instead_of_clipping() {
        let mut e = emitter();
        e.pos.x = 10.0; // left of min_x = 50
        e.advance(0.1);
        assert_eq!(e.motion, EmitterMotion::Moving { dir: 1.0 });
        assert!(e.pos.x > 10.0 && e.pos.x < 50.0);
    }

    #[test]
    fn test_spawn_anchor_is_below_emitter() {
        let e = emitter();
        let anchor = e.spawn_anchor();
        assert_eq!(anchor.x, e.pos.x);
        assert_eq!(anchor.y, e.pos.y - 50.0);
    }

    #[test]
    fn test_oversized_emitter_stays_put() {
        let tuning = Tuning {
            boss_size: 500.0,
            ..Tuning::default()
        };
        let mut e = Emitter::new(&tuning);
        e.advance(10.0);
        assert_eq!(e.pos.x, tuning.center_x());
    }
}

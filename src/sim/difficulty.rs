//! Spawn schedule and difficulty progression
//!
//! Two timers accumulate simulated time: the spawn timer (drops bombs and
//! tightens the spawn interval) and the difficulty timer (raises gravity).
//! Both only advance while the game is running.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Seconds between spawn events (non-increasing)
    pub spawn_interval: f32,
    /// Bombs per spawn event (non-decreasing, capped)
    pub batch_size: u32,
    /// Gravity magnitude in world units (non-decreasing, capped)
    pub gravity: f32,
    /// Seconds between gravity raises (non-increasing, floored)
    pub difficulty_interval: f32,
    /// Spawn events so far
    pub spawns: u32,
    /// Gravity raises so far
    pub raises: u32,
    /// Time since the spawn timer was last (re)scheduled
    pub spawn_timer: f32,
    /// Time since the difficulty timer was last (re)scheduled
    pub difficulty_timer: f32,
    /// Spawns that shortened the interval
    interval_steps: u32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            spawn_interval: tuning.initial_spawn_interval,
            batch_size: tuning.initial_batch.min(tuning.max_batch),
            gravity: tuning.initial_gravity,
            difficulty_interval: tuning.initial_difficulty_interval,
            spawns: 0,
            raises: 0,
            spawn_timer: 0.0,
            difficulty_timer: 0.0,
            interval_steps: 0,
        }
    }

    /// Feed elapsed running time into both timers
    pub fn accumulate(&mut self, dt: f32) {
        self.spawn_timer += dt;
        self.difficulty_timer += dt;
    }

    /// Take one due spawn event, returning how many bombs it drops.
    /// A non-positive interval never fires.
    ///
    /// Applies the post-spawn progression: batch grows, interval shrinks.
    /// A changed interval restarts the timer from zero (no immediate spawn);
    /// an unchanged one keeps its period.
    pub fn next_spawn(&mut self, tuning: &Tuning) -> Option<u32> {
        if !self.spawn_interval.is_finite() || self.spawn_interval <= 0.0 {
            return None;
        }
        if self.spawn_timer < self.spawn_interval {
            return None;
        }

        let batch = self.batch_size;
        self.spawns += 1;
        self.batch_size = (self.batch_size + 1).min(tuning.max_batch);

        let old_interval = self.spawn_interval;
        if old_interval > tuning.min_spawn_interval {
            self.interval_steps += 1;
            // Recomputed from the step count so repeated subtraction cannot drift
            self.spawn_interval = (tuning.initial_spawn_interval
                - tuning.spawn_interval_step * self.interval_steps as f32)
                .max(tuning.min_spawn_interval);
        }

        if self.spawn_interval != old_interval {
            self.spawn_timer = 0.0;
        } else {
            self.spawn_timer -= old_interval;
        }

        Some(batch)
    }

    /// Take one due difficulty raise, returning the new gravity.
    ///
    /// The raise grows as the difficulty interval tightens:
    /// `gravity_step * initial_interval / current_interval`.
    pub fn next_raise(&mut self, tuning: &Tuning) -> Option<f32> {
        if !self.difficulty_interval.is_finite() || self.difficulty_interval <= 0.0 {
            return None;
        }
        if self.difficulty_timer < self.difficulty_interval {
            return None;
        }

        let current = self.difficulty_interval;
        let bump = tuning.gravity_step * tuning.initial_difficulty_interval / current;
        // Never lowers gravity, even when it already sits above the cap
        self.gravity = self.gravity.max((self.gravity + bump).min(tuning.max_gravity));
        self.raises += 1;

        self.difficulty_interval =
            (current - tuning.difficulty_interval_step).max(tuning.min_difficulty_interval);
        if self.difficulty_interval != current {
            self.difficulty_timer = 0.0;
        } else {
            self.difficulty_timer -= current;
        }

        Some(self.gravity)
    }
}

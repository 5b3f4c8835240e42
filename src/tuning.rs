//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. Values can be
//! overridden from a JSON document; missing fields fall back to the defaults
//! in [`crate::consts`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tuning file: {e}"),
            Self::Parse(e) => write!(f, "failed to parse tuning JSON: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Game balance and playfield geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Fixed vertical centre of the paddle
    pub paddle_y: f32,

    // === Bombs ===
    pub bomb_size: f32,
    /// Horizontal spread applied to each spawned bomb (0 = stacked)
    pub spawn_jitter: f32,

    // === Boss ===
    pub boss_size: f32,
    pub boss_top_offset: f32,
    pub boss_drop_offset: f32,
    pub boss_move_duration: f32,
    pub boss_dwell: f32,

    // === Scoring ===
    pub starting_lives: u8,
    pub catch_score: u64,

    // === Spawn schedule ===
    pub initial_spawn_interval: f32,
    pub spawn_interval_step: f32,
    pub min_spawn_interval: f32,
    pub initial_batch: u32,
    pub max_batch: u32,

    // === Gravity ===
    pub initial_gravity: f32,
    pub gravity_scale: f32,
    pub gravity_step: f32,
    pub max_gravity: f32,

    // === Difficulty timer ===
    pub initial_difficulty_interval: f32,
    pub difficulty_interval_step: f32,
    pub min_difficulty_interval: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_y: PADDLE_Y,

            bomb_size: BOMB_SIZE,
            spawn_jitter: 0.0,

            boss_size: BOSS_SIZE,
            boss_top_offset: BOSS_TOP_OFFSET,
            boss_drop_offset: BOSS_DROP_OFFSET,
            boss_move_duration: BOSS_MOVE_DURATION,
            boss_dwell: BOSS_DWELL,

            starting_lives: STARTING_LIVES,
            catch_score: CATCH_SCORE,

            initial_spawn_interval: INITIAL_SPAWN_INTERVAL,
            spawn_interval_step: SPAWN_INTERVAL_STEP,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            initial_batch: INITIAL_BATCH,
            max_batch: MAX_BATCH,

            initial_gravity: INITIAL_GRAVITY,
            gravity_scale: GRAVITY_SCALE,
            gravity_step: GRAVITY_STEP,
            max_gravity: MAX_GRAVITY,

            initial_difficulty_interval: INITIAL_DIFFICULTY_INTERVAL,
            difficulty_interval_step: DIFFICULTY_INTERVAL_STEP,
            min_difficulty_interval: MIN_DIFFICULTY_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, v: f32) -> Result<(), TuningError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }
        fn non_negative(field: &'static str, v: f32) -> Result<(), TuningError> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be zero or positive",
                })
            }
        }

        positive("playfield_width", self.playfield_width)?;
        positive("playfield_height", self.playfield_height)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        non_negative("paddle_y", self.paddle_y)?;
        positive("bomb_size", self.bomb_size)?;
        non_negative("spawn_jitter", self.spawn_jitter)?;
        positive("boss_size", self.boss_size)?;
        non_negative("boss_top_offset", self.boss_top_offset)?;
        non_negative("boss_drop_offset", self.boss_drop_offset)?;
        positive("boss_move_duration", self.boss_move_duration)?;
        non_negative("boss_dwell", self.boss_dwell)?;
        positive("initial_spawn_interval", self.initial_spawn_interval)?;
        non_negative("spawn_interval_step", self.spawn_interval_step)?;
        positive("min_spawn_interval", self.min_spawn_interval)?;
        non_negative("initial_gravity", self.initial_gravity)?;
        positive("gravity_scale", self.gravity_scale)?;
        non_negative("gravity_step", self.gravity_step)?;
        non_negative("max_gravity", self.max_gravity)?;
        positive("initial_difficulty_interval", self.initial_difficulty_interval)?;
        non_negative("difficulty_interval_step", self.difficulty_interval_step)?;
        positive("min_difficulty_interval", self.min_difficulty_interval)?;

        if self.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1",
            });
        }
        if self.initial_batch == 0 {
            return Err(TuningError::Invalid {
                field: "initial_batch",
                reason: "must be at least 1",
            });
        }
        if self.max_batch < self.initial_batch {
            return Err(TuningError::Invalid {
                field: "max_batch",
                reason: "must not be below initial_batch",
            });
        }
        if self.max_gravity < self.initial_gravity {
            return Err(TuningError::Invalid {
                field: "max_gravity",
                reason: "must not be below initial_gravity",
            });
        }
        Ok(())
    }

    /// Horizontal centre of the playfield
    pub fn center_x(&self) -> f32 {
        self.playfield_width * 0.5
    }

    /// Vertical centre of the boss at rest
    pub fn boss_y(&self) -> f32 {
        self.playfield_height - self.boss_top_offset
    }
}

//! Bomb Catcher headless driver
//!
//! Runs the simulation with the demo AI at the wheel and logs what happens.
//!
//! Usage: `bomb-catcher [tuning.json] [seed]`

use anyhow::{Context, Result};
use bomb_catcher::Tuning;
use bomb_catcher::consts::*;
use bomb_catcher::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Frame time of the simulated display
const FRAME_DT: f32 = 1.0 / 60.0;
/// Stop after this much simulated time even if the AI is still alive
const MAX_RUN_SECS: f32 = 300.0;

/// Game instance driven by a fixed-timestep accumulator
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(tuning: Tuning, seed: u64) -> Result<Self> {
        let state = GameState::with_tuning(tuning, seed).context("invalid tuning")?;
        Ok(Self {
            state,
            accumulator: 0.0,
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
        })
    }

    /// Run simulation ticks for one display frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in self.state.drain_events() {
            match event {
                GameEvent::Catch { id, .. } => {
                    log::info!("Catch #{} (score {})", id, self.state.score())
                }
                GameEvent::Miss { id, pos } => log::info!(
                    "BOOM: bomb #{} hit the floor at x={:.0} ({} lives left)",
                    id,
                    pos.x,
                    self.state.lives()
                ),
                GameEvent::GameOver { score } => log::info!("Game over with {} points", score),
                other => log::debug!("{:?}", other),
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => {
            Tuning::load(&path).with_context(|| format!("failed to load tuning: {path}"))?
        }
        None => Tuning::default(),
    };
    let seed = match args.next() {
        Some(s) => s
            .parse::<u64>()
            .with_context(|| format!("invalid seed: {s}"))?,
        None => 42,
    };

    log::info!("Bomb Catcher (headless) starting with seed {}", seed);
    let mut game = Game::new(tuning, seed)?;

    let mut t = 0.0;
    while t < MAX_RUN_SECS && game.state.phase() != GamePhase::GameOver {
        game.update(FRAME_DT);
        t += FRAME_DT;
    }

    let snapshot = game.state.snapshot();
    let json = serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
    println!("{json}");
    Ok(())
}

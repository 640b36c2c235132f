//! Headless demo driver
//!
//! Runs a scripted session against the simulation and logs the events a real
//! engine front-end would consume: score display refreshes, one-shot sounds,
//! and particle emitter placements.
//!
//! Usage: `tilt-blast [seed] [tuning.json]`

use std::error::Error;

use tilt_blast::consts::{SIM_DT, TILT_SAMPLE_INTERVAL};
use tilt_blast::sim::{GameEvent, GameState, TickInput, tick};
use tilt_blast::tuning::Tuning;

/// Simulated session length in seconds
const SESSION_SECS: f32 = 30.0;

/// Fire roughly twice per second
const FIRE_PERIOD_TICKS: u64 = 60;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 0xC0FFEE,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };

    log::info!("starting session: seed={seed}");
    let mut state = GameState::with_tuning(seed, tuning);

    let total_ticks = (SESSION_SECS / SIM_DT) as u64;
    let sample_every = (TILT_SAMPLE_INTERVAL / SIM_DT) as u64;

    for i in 0..total_ticks {
        // Synthetic tilt: slow sweep left and right across the playfield
        let tilt_sample = if i % sample_every == 0 {
            let t = i as f32 * SIM_DT;
            Some((t * 0.8).sin() * 0.6)
        } else {
            None
        };

        let input = TickInput {
            fire: i % FIRE_PERIOD_TICKS == 0,
            tilt_sample,
        };
        tick(&mut state, &input, SIM_DT);

        for event in state.take_events() {
            match event {
                GameEvent::ScoreChanged(value) => log::info!("display: Score: {value}"),
                GameEvent::SoundPlayed(sound) => {
                    log::debug!("sound: {}", sound.asset_name())
                }
                GameEvent::EffectSpawned { pos } => {
                    log::debug!("explosion at ({:.1}, {:.1})", pos.x, pos.y)
                }
            }
        }
    }

    log::info!(
        "session over: {} aliens live, {} torpedoes in flight",
        state.aliens.len(),
        state.torpedoes.len()
    );
    println!("{}", state.score_label());
    Ok(())
}

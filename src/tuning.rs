//! Data-driven game balance
//!
//! Defaults reproduce the shipped constants exactly; a host can override any
//! subset from a JSON blob.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game balance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Frame dimensions (portrait, origin at center)
    pub frame_width: f32,
    pub frame_height: f32,

    /// Seconds between alien spawns
    pub spawn_interval_secs: f32,
    /// Seconds for an alien to fall top bound to bottom bound
    pub alien_fall_secs: f32,
    /// Seconds for a torpedo to reach the top of the frame
    pub torpedo_flight_secs: f32,

    /// Tilt filter raw-sample gain
    pub tilt_gain: f32,
    /// Tilt filter previous-value decay
    pub tilt_decay: f32,
    /// Smoothed tilt to player x scale
    pub steer_scale: f32,
    /// Extra margin past the playfield edge before wraparound
    pub wrap_margin: f32,

    /// Torpedo muzzle offset below the player origin
    pub torpedo_muzzle_offset: f32,
    /// Points per destroyed alien
    pub score_per_alien: u32,
    /// Explosion emitter lifetime in seconds
    pub explosion_ttl_secs: f32,

    /// Collision sizes
    pub alien_half_width: f32,
    pub alien_half_height: f32,
    pub torpedo_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            frame_width: FRAME_WIDTH,
            frame_height: FRAME_HEIGHT,
            spawn_interval_secs: SPAWN_INTERVAL,
            alien_fall_secs: ALIEN_FALL_SECS,
            torpedo_flight_secs: TORPEDO_FLIGHT_SECS,
            tilt_gain: TILT_GAIN,
            tilt_decay: TILT_DECAY,
            steer_scale: STEER_SCALE,
            wrap_margin: WRAP_MARGIN,
            torpedo_muzzle_offset: TORPEDO_MUZZLE_OFFSET,
            score_per_alien: SCORE_PER_ALIEN,
            explosion_ttl_secs: EXPLOSION_TTL_SECS,
            alien_half_width: ALIEN_HALF_WIDTH,
            alien_half_height: ALIEN_HALF_HEIGHT,
            torpedo_radius: TORPEDO_RADIUS,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

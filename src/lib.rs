//! Tilt Blast - a tilt-steered vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, contacts, scoring)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio playback, and sensor plumbing live in the host engine;
//! the simulation publishes `GameEvent`s for the host to act on.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Frame dimensions (portrait, origin at center)
    pub const FRAME_WIDTH: f32 = 480.0;
    pub const FRAME_HEIGHT: f32 = 800.0;

    /// Alien spawn period in seconds
    pub const SPAWN_INTERVAL: f32 = 0.75;
    /// Time for an alien to fall from top bound to bottom bound
    pub const ALIEN_FALL_SECS: f32 = 6.0;
    /// Time for a torpedo to reach the top of the frame
    pub const TORPEDO_FLIGHT_SECS: f32 = 0.5;

    /// Accelerometer sample period in seconds (host cadence)
    pub const TILT_SAMPLE_INTERVAL: f32 = 0.2;
    /// Raw sample gain in the tilt filter (intentionally > 1, unnormalized)
    pub const TILT_GAIN: f32 = 5.0;
    /// Previous-value decay in the tilt filter
    pub const TILT_DECAY: f32 = 0.55;
    /// Smoothed tilt to player x scale
    pub const STEER_SCALE: f32 = 50.0;

    /// Extra margin past the playfield edge before wraparound
    pub const WRAP_MARGIN: f32 = 20.0;

    /// Torpedo muzzle offset below the player origin
    pub const TORPEDO_MUZZLE_OFFSET: f32 = 5.0;

    /// Points per destroyed alien
    pub const SCORE_PER_ALIEN: u32 = 5;
    /// Explosion emitter lifetime in seconds
    pub const EXPLOSION_TTL_SECS: f32 = 2.0;

    /// Entity collision sizes
    pub const ALIEN_HALF_WIDTH: f32 = 16.0;
    pub const ALIEN_HALF_HEIGHT: f32 = 14.0;
    pub const TORPEDO_RADIUS: f32 = 6.0;
}

/// Half-span of the playfield for a given frame dimension.
///
/// The playable strip is the middle 80% of the frame (`dim / 2.5` on either
/// side of center); spawn positions and the score layout both use it.
#[inline]
pub fn half_span(dim: f32) -> f32 {
    dim / 2.5
}

/// Wrap a horizontal position into `[-limit, limit]` by teleporting to the
/// opposite edge when it crosses either bound.
#[inline]
pub fn wrap_horizontal(x: f32, limit: f32) -> f32 {
    if x < -limit {
        limit
    } else if x > limit {
        -limit
    } else {
        x
    }
}

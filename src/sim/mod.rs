//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod contact;
pub mod state;
pub mod tick;

pub use contact::{
    ALIEN_CATEGORY, ContactBody, TORPEDO_CATEGORY, classify_hit, torpedo_hits_alien,
};
pub use state::{
    Alien, AlienVariant, Effect, GameEvent, GameState, Player, SoundEffect, Torpedo,
};
pub use tick::{TickInput, apply_tilt_sample, fire_torpedo, on_contact, spawn_alien, tick};

//! Game state and core simulation types
//!
//! Everything the fixed-timestep loop mutates lives here. The state is
//! deterministic: seeded RNG, stable entity iteration order (by insertion,
//! which is ascending ID), no platform dependencies.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::tuning::Tuning;

/// Sound effects the host engine should play (one-shot, fire-and-forget).
///
/// Lookup failures for the backing asset are the host's problem and are
/// treated as silent no-ops, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Torpedo launched
    TorpedoFired,
    /// Alien destroyed
    AlienExplosion,
}

impl SoundEffect {
    /// Asset name the host resolves against its sound bank
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::TorpedoFired => "torpedo",
            SoundEffect::AlienExplosion => "explosion",
        }
    }
}

/// Commands and notifications for the host, drained once per tick.
///
/// This is the observer seam: the score display, sound playback, and particle
/// spawning all hang off these instead of the sim poking at the scene graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Score value changed; display should re-render `"Score: {value}"`
    ScoreChanged(u32),
    /// Play a one-shot sound
    SoundPlayed(SoundEffect),
    /// An explosion emitter was placed at the given position
    EffectSpawned { pos: Vec2 },
}

/// Alien sprite variants, chosen uniformly at random per spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlienVariant {
    Drone,
    Raider,
    Saucer,
}

impl AlienVariant {
    pub const COUNT: u32 = 3;

    /// Uniform random variant
    pub fn pick(rng: &mut Pcg32) -> Self {
        match rng.random_range(0..Self::COUNT) {
            0 => AlienVariant::Drone,
            1 => AlienVariant::Raider,
            _ => AlienVariant::Saucer,
        }
    }

    /// Sprite asset name for the host renderer
    pub fn asset_name(&self) -> &'static str {
        match self {
            AlienVariant::Drone => "alien",
            AlienVariant::Raider => "alien2",
            AlienVariant::Saucer => "alien3",
        }
    }
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Position; y is fixed for the whole session, x is rewritten each
    /// physics step from the smoothed tilt
    pub pos: Vec2,
}

/// A descending alien
#[derive(Debug, Clone)]
pub struct Alien {
    pub id: u32,
    pub variant: AlienVariant,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// An upward-flying torpedo
#[derive(Debug, Clone)]
pub struct Torpedo {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// A transient explosion emitter, expired by TTL
#[derive(Debug, Clone)]
pub struct Effect {
    pub id: u32,
    pub pos: Vec2,
    pub ttl_ticks: u32,
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG (alien variants and spawn positions)
    pub rng: Pcg32,
    /// Game balance parameters
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Score (monotone non-decreasing)
    pub score: u32,
    /// Smoothed tilt accumulator (unclamped, unnormalized filter)
    pub tilt: f32,
    /// Seconds accumulated toward the next alien spawn
    pub spawn_timer: f32,
    /// The player ship
    pub player: Player,
    /// Live aliens, ascending ID order
    pub aliens: Vec<Alien>,
    /// Live torpedoes, ascending ID order
    pub torpedoes: Vec<Torpedo>,
    /// Live explosion emitters
    pub effects: Vec<Effect>,
    /// Torpedo/alien ID pairs currently touching; begin-contact fires once
    /// per pair while it stays in this set
    pub touching: Vec<(u32, u32)>,
    /// Events accumulated this tick, drained by the host
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with explicit tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player_y = -tuning.frame_height / 2.5;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            time_ticks: 0,
            score: 0,
            tilt: 0.0,
            spawn_timer: 0.0,
            player: Player {
                pos: Vec2::new(0.0, player_y),
            },
            aliens: Vec::new(),
            torpedoes: Vec::new(),
            effects: Vec::new(),
            touching: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };
        // Initial display refresh, same as session start
        state.push_event(GameEvent::ScoreChanged(0));
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Horizontal wraparound limit for the player
    pub fn wrap_limit(&self) -> f32 {
        crate::half_span(self.tuning.frame_width) + self.tuning.wrap_margin
    }

    /// Queue an event for the host
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all pending events (call once per tick from the host)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Score text as the display renders it
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Add to the score and notify the display
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
        let score = self.score;
        self.push_event(GameEvent::ScoreChanged(score));
    }

    /// Remove an alien by ID. Idempotent: a missing ID is a no-op, so a
    /// collision racing an out-of-bounds expiry cannot double-remove.
    pub fn remove_alien(&mut self, id: u32) -> bool {
        let before = self.aliens.len();
        self.aliens.retain(|a| a.id != id);
        self.aliens.len() != before
    }

    /// Remove a torpedo by ID (idempotent, see `remove_alien`)
    pub fn remove_torpedo(&mut self, id: u32) -> bool {
        let before = self.torpedoes.len();
        self.torpedoes.retain(|t| t.id != id);
        self.torpedoes.len() != before
    }
}

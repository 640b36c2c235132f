//! Fixed timestep simulation tick
//!
//! Core game loop that advances the scene deterministically: tilt input,
//! torpedo fire, the alien spawn timer, linear entity motion with
//! out-of-bounds expiry, the player steering step, and the contact pass.

use glam::Vec2;

use super::contact::{
    ALIEN_CATEGORY, ContactBody, TORPEDO_CATEGORY, classify_hit, torpedo_hits_alien,
};
use super::state::{Alien, AlienVariant, Effect, GameEvent, GameState, SoundEffect, Torpedo};
use crate::consts::SIM_DT;
use crate::{half_span, wrap_horizontal};

use rand::Rng;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Fire a torpedo (tap/touch-release). No cooldown, no ammo limit.
    pub fire: bool,
    /// Raw accelerometer x sample, present on the sensor's own cadence
    /// (nominally every 0.2 s), absent on ticks in between
    pub tilt_sample: Option<f32>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    if let Some(raw_x) = input.tilt_sample {
        apply_tilt_sample(state, raw_x);
    }

    if input.fire {
        fire_torpedo(state);
    }

    // Spawn timer, carrying the remainder so the period stays exact
    state.spawn_timer += dt;
    while state.spawn_timer >= state.tuning.spawn_interval_secs {
        state.spawn_timer -= state.tuning.spawn_interval_secs;
        spawn_alien(state);
    }

    integrate_motion(state, dt);
    step_player(state);
    contact_pass(state);
}

/// Fold a raw sensor sample into the smoothed tilt estimate.
///
/// `smoothed = raw * 5 + smoothed * 0.55` - the gains do not sum to 1, so
/// sustained tilt accumulates past the raw range. Kept as designed.
pub fn apply_tilt_sample(state: &mut GameState, raw_x: f32) {
    state.tilt = raw_x * state.tuning.tilt_gain + state.tilt * state.tuning.tilt_decay;
}

/// Spawn one alien at a random x just above the top bound, falling to the
/// bottom bound over the fixed fall duration.
pub fn spawn_alien(state: &mut GameState) {
    let span = half_span(state.tuning.frame_width);
    let x = state.rng.random_range(-span..=span);
    let variant = AlienVariant::pick(&mut state.rng);

    let top = half_span(state.tuning.frame_height) + state.tuning.alien_half_height * 2.0;
    let bottom = -half_span(state.tuning.frame_height);
    let vel_y = (bottom - top) / state.tuning.alien_fall_secs;

    let id = state.next_entity_id();
    state.aliens.push(Alien {
        id,
        variant,
        pos: Vec2::new(x, top),
        vel: Vec2::new(0.0, vel_y),
    });
}

/// Launch a torpedo from just below the player, flying to the top of the
/// frame over the fixed flight duration.
pub fn fire_torpedo(state: &mut GameState) {
    let start = state.player.pos - Vec2::new(0.0, state.tuning.torpedo_muzzle_offset);
    let target_y = state.tuning.frame_height;
    let vel_y = (target_y - start.y) / state.tuning.torpedo_flight_secs;

    let id = state.next_entity_id();
    state.torpedoes.push(Torpedo {
        id,
        pos: start,
        vel: Vec2::new(0.0, vel_y),
    });
    state.push_event(GameEvent::SoundPlayed(SoundEffect::TorpedoFired));
}

/// Integrate linear motion and expire entities that reached their bound.
/// Timeout removal carries no score change.
fn integrate_motion(state: &mut GameState, dt: f32) {
    let bottom = -half_span(state.tuning.frame_height);
    let top = state.tuning.frame_height;

    for alien in &mut state.aliens {
        alien.pos += alien.vel * dt;
    }
    state.aliens.retain(|a| a.pos.y > bottom);

    for torpedo in &mut state.torpedoes {
        torpedo.pos += torpedo.vel * dt;
    }
    state.torpedoes.retain(|t| t.pos.y < top);

    for effect in &mut state.effects {
        effect.ttl_ticks = effect.ttl_ticks.saturating_sub(1);
    }
    state.effects.retain(|e| e.ttl_ticks > 0);
}

/// Steering step: player x follows the smoothed tilt, with horizontal
/// wraparound past either edge. Vertical position never changes.
fn step_player(state: &mut GameState) {
    let x = state.tilt * state.tuning.steer_scale;
    state.player.pos.x = wrap_horizontal(x, state.wrap_limit());
}

/// Overlap pass over live torpedo/alien pairs. Begin-contact fires once per
/// new touching pair; pairs still touching from last step are skipped.
fn contact_pass(state: &mut GameState) {
    let mut now_touching: Vec<(u32, u32)> = Vec::new();
    let mut begins: Vec<(ContactBody, ContactBody)> = Vec::new();

    for torpedo in &state.torpedoes {
        for alien in &state.aliens {
            let hit = torpedo_hits_alien(
                torpedo.pos,
                state.tuning.torpedo_radius,
                alien.pos,
                Vec2::new(state.tuning.alien_half_width, state.tuning.alien_half_height),
            );
            if !hit {
                continue;
            }
            let pair = (torpedo.id, alien.id);
            now_touching.push(pair);
            if !state.touching.contains(&pair) {
                begins.push((
                    ContactBody {
                        id: torpedo.id,
                        category: TORPEDO_CATEGORY,
                        pos: torpedo.pos,
                    },
                    ContactBody {
                        id: alien.id,
                        category: ALIEN_CATEGORY,
                        pos: alien.pos,
                    },
                ));
            }
        }
    }

    state.touching = now_touching;

    for (body_a, body_b) in begins {
        on_contact(state, body_a, body_b);
    }
}

/// Begin-contact handler. Order-normalizes the pair and dispatches only the
/// {Torpedo, Alien} combination; anything else is a no-op.
pub fn on_contact(state: &mut GameState, body_a: ContactBody, body_b: ContactBody) {
    if let Some((torpedo, alien)) = classify_hit(body_a, body_b) {
        resolve_collision(state, torpedo.id, alien.id);
    }
}

/// Resolve a confirmed torpedo/alien hit: explosion effect at the alien,
/// explosion sound, both entities removed, score +5.
///
/// Tolerates entities already removed this step (expiry, or an earlier hit
/// claiming the same alien): the kill only counts while the alien is live.
pub fn resolve_collision(state: &mut GameState, torpedo_id: u32, alien_id: u32) {
    let Some(alien_pos) = state
        .aliens
        .iter()
        .find(|a| a.id == alien_id)
        .map(|a| a.pos)
    else {
        state.remove_torpedo(torpedo_id);
        return;
    };

    state.remove_torpedo(torpedo_id);
    state.remove_alien(alien_id);

    let ttl_ticks = (state.tuning.explosion_ttl_secs / SIM_DT).round() as u32;
    let id = state.next_entity_id();
    state.effects.push(Effect {
        id,
        pos: alien_pos,
        ttl_ticks,
    });
    state.push_event(GameEvent::EffectSpawned { pos: alien_pos });
    state.push_event(GameEvent::SoundPlayed(SoundEffect::AlienExplosion));

    let points = state.tuning.score_per_alien;
    state.add_score(points);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_secs(state: &mut GameState, secs: f32, input: &TickInput) {
        let ticks = (secs / SIM_DT).ceil() as u64;
        for _ in 0..ticks {
            tick(state, input, SIM_DT);
        }
    }

    #[test]
    fn test_tilt_filter_values() {
        let mut state = GameState::new(1);
        apply_tilt_sample(&mut state, 1.0);
        assert!((state.tilt - 5.0).abs() < 1e-6);
        apply_tilt_sample(&mut state, 0.0);
        assert!((state.tilt - 2.75).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = GameState::new(1);
        let input = TickInput::default();

        // Just short of one period: nothing spawned yet
        run_secs(&mut state, 0.7, &input);
        assert!(state.aliens.is_empty());

        // Past one period: exactly one alien
        run_secs(&mut state, 0.1, &input);
        assert_eq!(state.aliens.len(), 1);

        // Past four periods total: four aliens, none expired yet
        run_secs(&mut state, 2.3, &input);
        assert_eq!(state.aliens.len(), 4);
    }

    #[test]
    fn test_alien_expires_after_fall_no_score() {
        let mut state = GameState::new(1);
        spawn_alien(&mut state);
        assert_eq!(state.aliens.len(), 1);

        // Disable further spawning so only the one alien is in play
        state.tuning.spawn_interval_secs = f32::INFINITY;

        run_secs(&mut state, 5.9, &TickInput::default());
        assert_eq!(state.aliens.len(), 1);

        run_secs(&mut state, 0.2, &TickInput::default());
        assert!(state.aliens.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_torpedo_expires_at_top() {
        let mut state = GameState::new(1);
        state.tuning.spawn_interval_secs = f32::INFINITY;
        fire_torpedo(&mut state);
        assert_eq!(state.torpedoes.len(), 1);

        run_secs(&mut state, 0.6, &TickInput::default());
        assert!(state.torpedoes.is_empty());
    }

    #[test]
    fn test_fire_emits_sound() {
        let mut state = GameState::new(1);
        state.take_events();
        fire_torpedo(&mut state);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::SoundPlayed(SoundEffect::TorpedoFired))
        );
    }

    #[test]
    fn test_collision_scores_once_and_removes_both() {
        let mut state = GameState::new(1);
        state.tuning.spawn_interval_secs = f32::INFINITY;
        state.take_events();

        // Alien parked right above the player, torpedo fired straight at it
        let alien_id = state.next_entity_id();
        state.aliens.push(Alien {
            id: alien_id,
            variant: AlienVariant::Drone,
            pos: state.player.pos + Vec2::new(0.0, 120.0),
            vel: Vec2::ZERO,
        });
        fire_torpedo(&mut state);

        run_secs(&mut state, 0.5, &TickInput::default());

        assert_eq!(state.score, 5);
        assert!(state.aliens.is_empty());
        assert!(state.torpedoes.is_empty());
        assert_eq!(state.effects.len(), 1);

        let events = state.take_events();
        let score_changes = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ScoreChanged(_)))
            .count();
        assert_eq!(score_changes, 1);
        assert!(events.contains(&GameEvent::SoundPlayed(SoundEffect::AlienExplosion)));

        // Contact does not re-fire on later steps
        run_secs(&mut state, 0.5, &TickInput::default());
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_two_torpedoes_one_alien_single_kill() {
        let mut state = GameState::new(1);
        state.tuning.spawn_interval_secs = f32::INFINITY;

        let alien_id = state.next_entity_id();
        let alien_pos = state.player.pos + Vec2::new(0.0, 100.0);
        state.aliens.push(Alien {
            id: alien_id,
            variant: AlienVariant::Saucer,
            pos: alien_pos,
            vel: Vec2::ZERO,
        });

        // Two torpedoes overlapping the same alien on the same step
        for _ in 0..2 {
            let id = state.next_entity_id();
            state.torpedoes.push(Torpedo {
                id,
                pos: alien_pos,
                vel: Vec2::ZERO,
            });
        }

        tick(&mut state, &TickInput::default(), SIM_DT);

        // Both torpedoes consumed, but the alien only scores once
        assert_eq!(state.score, 5);
        assert!(state.aliens.is_empty());
        assert!(state.torpedoes.is_empty());
    }

    #[test]
    fn test_explosion_effect_expires() {
        let mut state = GameState::new(1);
        state.tuning.spawn_interval_secs = f32::INFINITY;

        let alien_id = state.next_entity_id();
        state.aliens.push(Alien {
            id: alien_id,
            variant: AlienVariant::Raider,
            pos: Vec2::new(0.0, 0.0),
            vel: Vec2::ZERO,
        });
        let torpedo_id = state.next_entity_id();
        state.torpedoes.push(Torpedo {
            id: torpedo_id,
            pos: Vec2::new(0.0, 0.0),
            vel: Vec2::ZERO,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.effects.len(), 1);

        run_secs(&mut state, 2.1, &TickInput::default());
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                tilt_sample: Some(0.4),
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..600 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.aliens.len(), state2.aliens.len());
        for (a, b) in state1.aliens.iter().zip(&state2.aliens) {
            assert_eq!(a.id, b.id);
            assert!((a.pos - b.pos).length() < 1e-6);
        }
        assert!((state1.player.pos.x - state2.player.pos.x).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_player_stays_within_wrap_bounds(raw in -100.0f32..100.0) {
            let mut state = GameState::new(5);
            state.tuning.spawn_interval_secs = f32::INFINITY;
            let input = TickInput { tilt_sample: Some(raw), ..Default::default() };
            for _ in 0..30 {
                tick(&mut state, &input, SIM_DT);
                let limit = state.wrap_limit();
                prop_assert!(state.player.pos.x >= -limit);
                prop_assert!(state.player.pos.x <= limit);
            }
        }

        #[test]
        fn prop_tilt_filter_recurrence(raw in -10.0f32..10.0, prev in -50.0f32..50.0) {
            let mut state = GameState::new(5);
            state.tilt = prev;
            apply_tilt_sample(&mut state, raw);
            prop_assert!((state.tilt - (raw * 5.0 + prev * 0.55)).abs() < 1e-4);
        }

        #[test]
        fn prop_score_monotone(seed in 0u64..1000) {
            let mut state = GameState::new(seed);
            let mut last = state.score;
            for i in 0..240u32 {
                let input = TickInput {
                    fire: i % 12 == 0,
                    tilt_sample: if i % 24 == 0 { Some(0.3) } else { None },
                };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.score >= last);
                prop_assert!(state.score.is_multiple_of(5));
                last = state.score;
            }
        }
    }
}

//! Contact filtering and overlap tests
//!
//! Mirrors a mask-based physics contact system: every tracked body carries a
//! category bitmask, and only pairs whose masks select each other are
//! reported. The tick loop hands begin-contact pairs to a plain handler
//! function rather than a delegate object.

use glam::Vec2;

/// Torpedo physics category
pub const TORPEDO_CATEGORY: u32 = 0x1 << 0;
/// Alien physics category
pub const ALIEN_CATEGORY: u32 = 0x1 << 1;

/// The view of an entity handed to the contact handler
#[derive(Debug, Clone, Copy)]
pub struct ContactBody {
    pub id: u32,
    pub category: u32,
    pub pos: Vec2,
}

/// Order-normalize a contact pair by ascending category so the handler only
/// needs one tag-combination check.
#[inline]
pub fn normalize_pair(a: ContactBody, b: ContactBody) -> (ContactBody, ContactBody) {
    if a.category < b.category { (a, b) } else { (b, a) }
}

/// Classify a contact as a torpedo/alien hit.
///
/// Containment checks (`&`) rather than equality, so bodies gaining extra
/// category bits later still match. Any other combination is ignored:
/// collision masks are configured so only Torpedo-Alien contacts get
/// reported, but a stray pair must still be a no-op.
pub fn classify_hit(body_a: ContactBody, body_b: ContactBody) -> Option<(ContactBody, ContactBody)> {
    let (first, second) = normalize_pair(body_a, body_b);
    if (first.category & TORPEDO_CATEGORY) != 0 && (second.category & ALIEN_CATEGORY) != 0 {
        Some((first, second))
    } else {
        None
    }
}

/// Circle-vs-rectangle overlap test.
///
/// The torpedo is a circle (the fast mover, so the test is exact rather than
/// discretized); the alien is an axis-aligned rectangle.
pub fn torpedo_hits_alien(
    torpedo_pos: Vec2,
    torpedo_radius: f32,
    alien_pos: Vec2,
    alien_half: Vec2,
) -> bool {
    let delta = torpedo_pos - alien_pos;
    let closest = Vec2::new(
        delta.x.clamp(-alien_half.x, alien_half.x),
        delta.y.clamp(-alien_half.y, alien_half.y),
    );
    (delta - closest).length_squared() <= torpedo_radius * torpedo_radius
}

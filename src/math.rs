//! Geometry helpers shared by movement, collision, and steering systems.
//!
//! Everything here is a pure function over [`Vec2`], so the combat systems
//! stay thin and the edge cases (zero-length directions, overlapping centres)
//! are tested once, in one place.

use bevy::prelude::*;

/// Direction vectors shorter than this are treated as degenerate.
pub const DIR_EPSILON: f32 = 1e-3;

/// Normalize `v`, returning `Vec2::ZERO` when its length is below
/// [`DIR_EPSILON`].
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.length();
    if len < DIR_EPSILON {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// Unit vector from `from` toward `to`; `Vec2::X` when the points coincide.
///
/// The +X fallback keeps knockback and dash directions well-defined when an
/// enemy spawns exactly on top of its target.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let d = normalize_or_zero(to - from);
    if d == Vec2::ZERO {
        Vec2::X
    } else {
        d
    }
}

/// True when the two circles overlap or touch.
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) <= r * r
}

/// Steer a constant-speed projectile toward `target_dir`.
///
/// Blends the current velocity with the desired velocity by `strength`, then
/// renormalizes the result back to `speed`.  Velocity direction therefore
/// turns gradually while speed never changes; `strength` near 1.0 snaps
/// instantly, near 0.0 barely curves.  If the blend cancels to zero the
/// current velocity is kept.
#[inline]
pub fn steer(velocity: Vec2, target_dir: Vec2, strength: f32, speed: f32) -> Vec2 {
    let desired = target_dir * speed;
    let blended = velocity * (1.0 - strength) + desired * strength;
    let dir = normalize_or_zero(blended);
    if dir == Vec2::ZERO {
        velocity
    } else {
        dir * speed
    }
}

/// Displacement pushing a body at `pos` directly away from `source` by
/// `strength` world units.
#[inline]
pub fn knockback_offset(pos: Vec2, source: Vec2, strength: f32) -> Vec2 {
    direction_to(source, pos) * strength
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_or_zero_handles_degenerate_input() {
        assert_eq!(normalize_or_zero(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(normalize_or_zero(Vec2::new(1e-5, -1e-5)), Vec2::ZERO);
        let n = normalize_or_zero(Vec2::new(3.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn direction_to_coincident_points_falls_back_to_plus_x() {
        let p = Vec2::new(100.0, 50.0);
        assert_eq!(direction_to(p, p), Vec2::X);
    }

    #[test]
    fn circles_overlap_is_inclusive_at_touch_distance() {
        let a = Vec2::ZERO;
        let b = Vec2::new(30.0, 0.0);
        assert!(circles_overlap(a, 10.0, b, 20.0));
        assert!(!circles_overlap(a, 10.0, b, 19.9));
    }

    #[test]
    fn steer_preserves_speed() {
        let v = Vec2::new(380.0, 0.0);
        let steered = steer(v, Vec2::Y, 0.22, 380.0);
        assert!((steered.length() - 380.0).abs() < 1e-3);
        // Turned toward +Y but not all the way.
        assert!(steered.y > 0.0);
        assert!(steered.x > 0.0);
    }

    #[test]
    fn steer_full_strength_snaps_to_target_direction() {
        let v = Vec2::new(-200.0, 0.0);
        let steered = steer(v, Vec2::Y, 1.0, 200.0);
        assert!((steered - Vec2::new(0.0, 200.0)).length() < 1e-3);
    }

    #[test]
    fn steer_opposing_blend_keeps_current_velocity() {
        // Desired exactly cancels the retained component.
        let v = Vec2::new(100.0, 0.0);
        let steered = steer(v, Vec2::NEG_X, 0.5, 100.0);
        assert_eq!(steered, v);
    }

    #[test]
    fn knockback_pushes_away_from_source() {
        let offset = knockback_offset(Vec2::new(10.0, 0.0), Vec2::ZERO, 13.0);
        assert!((offset - Vec2::new(13.0, 0.0)).length() < 1e-4);
        // Coincident source still produces a full-strength push.
        let offset = knockback_offset(Vec2::ZERO, Vec2::ZERO, 13.0);
        assert!((offset.length() - 13.0).abs() < 1e-4);
    }
}

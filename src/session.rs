//! Run-wide clock, difficulty scaling, and shared motion components.
//!
//! The simulation is driven entirely by accumulated simulation time: every
//! frame [`run_clock_system`] clamps the render delta to [`MAX_FRAME_DT`] and
//! advances [`RunClock`], and every other gameplay system reads
//! `clock.dt` instead of `Time` directly.  Wall-clock time never leaks into
//! gameplay, so a debugger pause or window drag cannot distort the run.

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::constants::MAX_FRAME_DT;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Accumulated simulation time for the current run.
#[derive(Resource, Debug, Clone, Default)]
pub struct RunClock {
    /// Total simulation seconds since the run started.
    pub elapsed: f32,
    /// Clamped step for the current frame; all gameplay systems integrate by
    /// this value.
    pub dt: f32,
}

/// Global enemy scaling multiplier, recomputed each frame from the run clock.
///
/// Applied to enemy HP, attack, and experience reward at spawn time; speed
/// and radius are never scaled.
#[derive(Resource, Debug, Clone)]
pub struct Difficulty(pub f32);

impl Default for Difficulty {
    fn default() -> Self {
        Self(1.0)
    }
}

// ── Components ────────────────────────────────────────────────────────────────

/// Straight-line velocity for projectiles and pickups (world units / second).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Velocity(pub Vec2);

/// Remaining lifetime in simulation seconds; the owning entity is despawned
/// (or detonated, for boss orbs) when this reaches zero.
#[derive(Component, Debug, Clone, Copy)]
pub struct Lifetime(pub f32);

// ── Systems ───────────────────────────────────────────────────────────────────

/// Advance the run clock by the clamped frame delta and refresh the
/// difficulty multiplier.
pub fn run_clock_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut clock: ResMut<RunClock>,
    mut difficulty: ResMut<Difficulty>,
) {
    let dt = time.delta_secs().min(MAX_FRAME_DT);
    clock.dt = dt;
    clock.elapsed += dt;
    difficulty.0 = 1.0 + config.difficulty_ramp_per_minute * (clock.elapsed / 60.0);
}

/// Integrate [`Velocity`] into position for every moving entity.
pub fn apply_velocity_system(clock: Res<RunClock>, mut query: Query<(&Velocity, &mut Transform)>) {
    for (velocity, mut transform) in query.iter_mut() {
        transform.translation.x += velocity.0.x * clock.dt;
        transform.translation.y += velocity.0.y * clock.dt;
    }
}

/// Count down [`Lifetime`] components and despawn expired entities.
///
/// Boss orbs are excluded here; their expiry detonates instead and is handled
/// by `enemy::boss::boss_orb_detonation_system`.
pub fn expire_lifetimes_system(
    mut commands: Commands,
    clock: Res<RunClock>,
    mut query: Query<(Entity, &mut Lifetime), Without<crate::enemy::boss::BossOrb>>,
) {
    for (entity, mut lifetime) in query.iter_mut() {
        lifetime.0 -= clock.dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

//! Centralised gameplay tuning constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//!
//! ## Tuning guidance
//!
//! Each constant includes the observable consequence of changing it.  The
//! per-level weapon tables live in [`crate::weapons::tables`]; everything
//! scalar is here.  [`crate::config::GameConfig`] mirrors the run-shaping
//! subset of these values so they can be overridden from `assets/tuning.toml`
//! without recompiling.

use std::f32::consts::TAU;

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Playfield width in world units.  Player movement is clamped inside
/// `[radius, ARENA_WIDTH - radius]`; enemies may roam outside while closing in.
pub const ARENA_WIDTH: f32 = 1600.0;

/// Playfield height in world units.
pub const ARENA_HEIGHT: f32 = 900.0;

// ── Simulation clock ──────────────────────────────────────────────────────────

/// Upper bound on a single simulation step (seconds).
///
/// A frame hitch longer than this advances the run clock by exactly this much,
/// so a multi-second stall cannot teleport enemies or fire a burst of queued
/// weapon ticks.
pub const MAX_FRAME_DT: f32 = 0.1;

// ── Player ────────────────────────────────────────────────────────────────────

/// Collision radius of the player circle (world units).
pub const PLAYER_RADIUS: f32 = 24.0;

/// Starting and baseline maximum hit points.
pub const PLAYER_MAX_HP: f32 = 100.0;

/// Player movement speed in world units per second.
///
/// The boss paces itself off this value, so raising it also speeds the boss.
pub const PLAYER_MOVE_SPEED: f32 = 260.0;

/// Seconds of invincibility granted after taking any hit.
///
/// This window is the only thing standing between the player and per-frame
/// contact damage from an overlapping swarm.
pub const PLAYER_INVINCIBILITY_SECS: f32 = 0.5;

// ── Progression ───────────────────────────────────────────────────────────────

/// Experience required to reach level 2.  Each subsequent threshold doubles.
pub const EXP_TO_FIRST_LEVEL: u32 = 200;

/// Maximum-HP increase granted per level.
pub const LEVEL_MAX_HP_BONUS: f32 = 25.0;

/// Fraction of the missing HP restored on each level-up, applied after the
/// max-HP increase.
pub const LEVEL_HEAL_FRACTION: f32 = 0.75;

/// Share of the upgrade-option probability mass reserved for the equipped
/// weapon's candidates; the remainder is split evenly over the rest.
pub const UPGRADE_EQUIPPED_WEIGHT: f32 = 0.4;

// ── Enemies: runner ───────────────────────────────────────────────────────────

pub const RUNNER_HP: f32 = 10.0;
pub const RUNNER_ATTACK: f32 = 5.0;
pub const RUNNER_SPEED: f32 = 140.0;
pub const RUNNER_RADIUS: f32 = 20.0;
pub const RUNNER_EXP: u32 = 10;

/// Runners spawn in groups of this size with small random offsets.
pub const RUNNER_CLUSTER_SIZE: u32 = 3;

/// Maximum per-axis offset (± world units) within a runner cluster.
pub const RUNNER_CLUSTER_SPREAD: f32 = 20.0;

// ── Enemies: stalker ──────────────────────────────────────────────────────────

pub const STALKER_HP: f32 = 20.0;
pub const STALKER_ATTACK: f32 = 8.0;
pub const STALKER_SPEED: f32 = 80.0;
pub const STALKER_RADIUS: f32 = 25.0;
pub const STALKER_EXP: u32 = 20;

// ── Enemies: bruiser ──────────────────────────────────────────────────────────

pub const BRUISER_HP: f32 = 50.0;
pub const BRUISER_ATTACK: f32 = 15.0;
pub const BRUISER_SPEED: f32 = 110.0;
pub const BRUISER_RADIUS: f32 = 35.0;
pub const BRUISER_EXP: u32 = 50;

/// Distance to the player below which a bruiser commits to a charge.
pub const BRUISER_CHARGE_RANGE: f32 = 250.0;

/// Charge speed (world units per second).  The direction is locked at charge
/// start, so a fast sidestep dodges the whole dash.
pub const BRUISER_CHARGE_SPEED: f32 = 300.0;

/// Duration of a single charge in seconds.
pub const BRUISER_CHARGE_DURATION: f32 = 0.8;

/// Cooldown between charges in seconds, measured from charge start.
pub const BRUISER_CHARGE_COOLDOWN: f32 = 2.0;

// ── Enemies: exploder ─────────────────────────────────────────────────────────

pub const EXPLODER_HP: f32 = 20.0;
pub const EXPLODER_ATTACK: f32 = 30.0;
pub const EXPLODER_SPEED: f32 = 230.0;
pub const EXPLODER_RADIUS: f32 = 20.0;
pub const EXPLODER_EXP: u32 = 15;

/// Blast radius of the death/contact explosion.
pub const EXPLODER_BLAST_RADIUS: f32 = 100.0;

// ── Enemies: spawning ─────────────────────────────────────────────────────────

/// Seconds between spawn waves.
pub const SPAWN_INTERVAL_SECS: f32 = 2.0;

/// Radius of the off-screen ring (centred on the player) where new enemies
/// appear.  Must exceed half the screen diagonal so spawns are never visible.
pub const SPAWN_RING_RADIUS: f32 = 950.0;

/// Additional difficulty multiplier gained per minute of run time.
///
/// `difficulty = 1 + DIFFICULTY_RAMP_PER_MINUTE * minutes`, applied to enemy
/// HP, attack, and experience reward (never to speed or radius).
pub const DIFFICULTY_RAMP_PER_MINUTE: f32 = 0.2;

/// Spawn-roll weights for runner cluster / stalker / bruiser / exploder.
pub const SPAWN_WEIGHTS: [f32; 4] = [0.40, 0.30, 0.15, 0.15];

/// Run time in seconds at which the boss fight begins.  Regular enemies are
/// cleared and regular spawning halts until the boss dies.
pub const BOSS_TRIGGER_SECS: f32 = 300.0;

// ── Boss ──────────────────────────────────────────────────────────────────────

pub const BOSS_HP: f32 = 100_000.0;
pub const BOSS_ATTACK: f32 = 30.0;
pub const BOSS_RADIUS: f32 = 60.0;
pub const BOSS_EXP: u32 = 50_000;

/// Boss chase speed as a multiple of [`PLAYER_MOVE_SPEED`].  Above 1.0 so the
/// player cannot simply outrun it; the slow debuff is the counter-play.
pub const BOSS_SPEED_FACTOR: f32 = 1.2;

/// Chase-speed multiplier while the slow debuff is active.
pub const BOSS_SLOW_FACTOR: f32 = 0.6;

/// Slow debuff duration in seconds; refreshed by every hit the boss takes.
pub const BOSS_SLOW_SECS: f32 = 1.0;

/// Seconds of chasing between dash attacks.
pub const BOSS_DASH_CYCLE_SECS: f32 = 7.0;

/// Seconds the boss stands still aiming before a dash.  The dash direction is
/// locked at the end of this window.
pub const BOSS_AIM_SECS: f32 = 1.0;

/// Dash duration and speed.
pub const BOSS_DASH_SECS: f32 = 0.3;
pub const BOSS_DASH_SPEED: f32 = 1500.0;

/// Contact damage while dashing (replaces the normal contact attack).
pub const BOSS_DASH_DAMAGE: f32 = 50.0;

// ── Boss: orbiting blade ──────────────────────────────────────────────────────

pub const BOSS_BLADE_SCALE: f32 = 2.0;
pub const BOSS_BLADE_DAMAGE: f32 = 50.0;

/// Blade orbit radius is `BASE + PER_SCALE * scale` world units from the boss
/// centre.
pub const BOSS_BLADE_ORBIT_BASE: f32 = 100.0;
pub const BOSS_BLADE_ORBIT_PER_SCALE: f32 = 16.0;

/// Blade hit-circle radius is `PER_SCALE * scale`.
pub const BOSS_BLADE_HIT_PER_SCALE: f32 = 18.0;

/// Blade angular speed in radians per second (one revolution per second).
pub const BOSS_BLADE_ANGULAR_SPEED: f32 = TAU;

// ── Boss: arrow volley ────────────────────────────────────────────────────────

pub const BOSS_VOLLEY_INTERVAL_SECS: f32 = 2.5;
pub const BOSS_VOLLEY_COUNT: u32 = 5;
pub const BOSS_VOLLEY_GAP_RADIANS: f32 = 10.0 * TAU / 360.0;
pub const BOSS_ARROW_SPEED: f32 = 420.0;
pub const BOSS_ARROW_LIFE_SECS: f32 = 5.0;
pub const BOSS_ARROW_DAMAGE: f32 = 90.0;
pub const BOSS_ARROW_RADIUS: f32 = 6.0;

// ── Boss: homing orbs ─────────────────────────────────────────────────────────

pub const BOSS_ORB_INTERVAL_SECS: f32 = 4.0;
pub const BOSS_ORB_COUNT: u32 = 12;
pub const BOSS_ORB_SPEED: f32 = 200.0;

/// Orb steering strength per step (see [`crate::math::steer`]).  Low enough
/// that circling the boss sheds the whole salvo.
pub const BOSS_ORB_HOMING_STRENGTH: f32 = 0.05;

/// Orb flight time before detonation.
pub const BOSS_ORB_LIFE_SECS: f32 = 2.0;

/// Detonation blast radius and damage at end of life.
pub const BOSS_ORB_DETONATE_RADIUS: f32 = 100.0;
pub const BOSS_ORB_DETONATE_DAMAGE: f32 = 15.0;

/// Direct-hit radius while in flight.
pub const BOSS_ORB_RADIUS: f32 = 8.0;

// ── Weapons: orbit blades ─────────────────────────────────────────────────────

pub const ORBIT_BASE_DAMAGE: f32 = 20.0;

/// Distance from the player at which blades orbit.
pub const ORBIT_RADIUS: f32 = 90.0;

/// Blade angular speed in radians per second (two revolutions per second).
pub const ORBIT_ANGULAR_SPEED: f32 = 2.0 * TAU;

/// Blade tip offset beyond the orbit radius, per point of blade scale.
pub const ORBIT_TIP_OFFSET_PER_SCALE: f32 = 40.0;

/// Blade hit-circle radius per point of blade scale.
pub const ORBIT_HIT_RADIUS_PER_SCALE: f32 = 25.0;

// ── Weapons: sweep ────────────────────────────────────────────────────────────

pub const SWEEP_BASE_DAMAGE: f32 = 20.0;

/// A full sweep covers `TAU` radians in this many seconds.
pub const SWEEP_DURATION_SECS: f32 = 0.5;

/// Knockback displacement applied to each enemy hit (world units).
pub const SWEEP_KNOCKBACK: f32 = 13.0;

// ── Weapons: volley ───────────────────────────────────────────────────────────

pub const VOLLEY_ARROW_SPEED: f32 = 420.0;
pub const VOLLEY_ARROW_RADIUS: f32 = 10.0;
pub const VOLLEY_GAP_RADIANS: f32 = 10.0 * TAU / 360.0;
pub const VOLLEY_ARROW_LIFE_SECS: f32 = 3.0;

// ── Weapons: homing ───────────────────────────────────────────────────────────

pub const HOMING_BASE_DAMAGE: f32 = 15.0;
pub const HOMING_INTERVAL_SECS: f32 = 0.5;
pub const HOMING_SPEED: f32 = 380.0;

/// Missile steering strength per step.  Much stickier than boss orbs; these
/// are meant to connect.
pub const HOMING_STRENGTH: f32 = 0.22;
pub const HOMING_LIFE_SECS: f32 = 7.0;
pub const HOMING_HIT_RADIUS: f32 = 15.0;

// ── Experience pickups ────────────────────────────────────────────────────────

/// Orb pickup radius (world units).
pub const ORB_RADIUS: f32 = 10.0;

/// Orbs within this distance of the player are magnetised.  Deliberately
/// larger than the arena so every dropped orb eventually arrives.
pub const MAGNET_RADIUS: f32 = 3000.0;

/// Speed of magnetised orbs (world units per second).
pub const MAGNET_SPEED: f32 = 500.0;

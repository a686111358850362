//! Enemy roster: per-kind base stats and the shared [`Enemy`] component.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::math;

/// Every enemy archetype in the game.
///
/// | Kind | Role |
/// |------|------|
/// | `Runner` | Fast, weak; spawns in small clusters |
/// | `Stalker` | Slow, tanky pressure |
/// | `Bruiser` | Mid-weight; charges when close |
/// | `Exploder` | Fast suicide bomber; detonates on contact or death |
/// | `Boss` | One-off arena boss with its own attack kit |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Runner,
    Stalker,
    Bruiser,
    Exploder,
    Boss,
}

impl EnemyKind {
    /// Base hit points before the difficulty multiplier.
    pub fn base_hp(self) -> f32 {
        match self {
            EnemyKind::Runner => RUNNER_HP,
            EnemyKind::Stalker => STALKER_HP,
            EnemyKind::Bruiser => BRUISER_HP,
            EnemyKind::Exploder => EXPLODER_HP,
            EnemyKind::Boss => BOSS_HP,
        }
    }

    /// Base contact damage before the difficulty multiplier.
    pub fn base_attack(self) -> f32 {
        match self {
            EnemyKind::Runner => RUNNER_ATTACK,
            EnemyKind::Stalker => STALKER_ATTACK,
            EnemyKind::Bruiser => BRUISER_ATTACK,
            EnemyKind::Exploder => EXPLODER_ATTACK,
            EnemyKind::Boss => BOSS_ATTACK,
        }
    }

    /// Movement speed in world units per second.  Never scaled by difficulty.
    ///
    /// The boss paces itself off the player instead; see
    /// `boss::boss_movement_system`.
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Runner => RUNNER_SPEED,
            EnemyKind::Stalker => STALKER_SPEED,
            EnemyKind::Bruiser => BRUISER_SPEED,
            EnemyKind::Exploder => EXPLODER_SPEED,
            EnemyKind::Boss => PLAYER_MOVE_SPEED * BOSS_SPEED_FACTOR,
        }
    }

    /// Collision radius in world units.
    pub fn radius(self) -> f32 {
        match self {
            EnemyKind::Runner => RUNNER_RADIUS,
            EnemyKind::Stalker => STALKER_RADIUS,
            EnemyKind::Bruiser => BRUISER_RADIUS,
            EnemyKind::Exploder => EXPLODER_RADIUS,
            EnemyKind::Boss => BOSS_RADIUS,
        }
    }

    /// Base experience dropped on death, before the difficulty multiplier.
    pub fn exp_reward(self) -> u32 {
        match self {
            EnemyKind::Runner => RUNNER_EXP,
            EnemyKind::Stalker => STALKER_EXP,
            EnemyKind::Bruiser => BRUISER_EXP,
            EnemyKind::Exploder => EXPLODER_EXP,
            EnemyKind::Boss => BOSS_EXP,
        }
    }
}

/// Live combat state attached to every enemy entity.
///
/// Death is a one-way flag: once `take_damage` clears `alive`, the corpse
/// stays inert until the end-of-frame sweep in
/// `crate::pickups::dead_enemy_sweep_system` converts it into an experience
/// orb and despawns it.  No system removes an enemy mid-iteration.
#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub hp: f32,
    pub max_hp: f32,
    pub attack: f32,
    pub speed: f32,
    pub radius: f32,
    pub exp_reward: u32,
    pub alive: bool,
}

impl Enemy {
    /// Build an enemy of `kind` with HP, attack, and experience reward scaled
    /// by `difficulty`.
    pub fn new(kind: EnemyKind, difficulty: f32) -> Self {
        let max_hp = kind.base_hp() * difficulty;
        Self {
            kind,
            hp: max_hp,
            max_hp,
            attack: kind.base_attack() * difficulty,
            speed: kind.speed(),
            radius: kind.radius(),
            exp_reward: (kind.exp_reward() as f32 * difficulty).round() as u32,
            alive: true,
        }
    }

    /// Apply `amount` damage.  Stored HP never drops below zero.  Returns
    /// `true` when this enemy is dead after the call; damage to a corpse
    /// changes nothing but still reports the kill.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive {
            return true;
        }
        self.hp = (self.hp - amount).max(0.0);
        if self.hp <= 0.0 {
            self.alive = false;
        }
        !self.alive
    }

    /// Displace `pos` away from `source` by `strength` world units.
    pub fn knockback(&self, pos: &mut Vec2, source: Vec2, strength: f32) {
        *pos += math::knockback_offset(*pos, source, strength);
    }
}

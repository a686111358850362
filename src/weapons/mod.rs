//! Weapon arsenal: the four weapon kinds, per-run ownership and levels, and
//! weighted upgrade-option generation.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`tables`] | Per-level tuning rows (pure data) |
//! | [`orbit`] | Blades circling the player |
//! | [`sweep`] | Periodic radial slash with knockback and lifesteal |
//! | [`volley`] | Fan of piercing arrows with critical hits |
//! | [`homing`] | Bursts of homing missiles |
//!
//! A run owns at most one instance of each kind; upgrades raise its level
//! (0–3).  The weapon chosen at run start stays "equipped" and its upgrade
//! candidates get a larger share of the option roll.

pub mod homing;
pub mod orbit;
pub mod sweep;
pub mod tables;
pub mod volley;

pub use homing::{homing_fire_system, homing_hit_system, homing_steer_system, HomingMissile};
pub use orbit::{orbit_damage_system, sync_orbit_blades_system, OrbitBlade, OrbitSpin};
pub use sweep::{sweep_system, ActiveSweep};
pub use volley::{volley_fire_system, volley_hit_system, Arrow};

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::UPGRADE_EQUIPPED_WEIGHT;

/// Highest weapon level; tables have `WEAPON_MAX_LEVEL + 1` rows.
pub const WEAPON_MAX_LEVEL: u8 = 3;

/// The four player weapon kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Orbit,
    Sweep,
    Volley,
    Homing,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Orbit,
        WeaponKind::Sweep,
        WeaponKind::Volley,
        WeaponKind::Homing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WeaponKind::Orbit => "ORBIT BLADES",
            WeaponKind::Sweep => "SWEEPING AXE",
            WeaponKind::Volley => "ARROW VOLLEY",
            WeaponKind::Homing => "HOMING CHARMS",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            WeaponKind::Orbit => "Blades circle you and shred anything they touch",
            WeaponKind::Sweep => "A slow arc that knocks the horde back and heals you",
            WeaponKind::Volley => "Piercing arrows at the nearest target, with crits",
            WeaponKind::Homing => "Seeking missiles that hunt down stragglers",
        }
    }
}

/// One owned weapon: its kind, level, and firing cooldown.
#[derive(Debug, Clone)]
pub struct WeaponSlot {
    pub kind: WeaponKind,
    pub level: u8,
    /// Seconds until the next shot, for interval-driven kinds.
    pub fire_timer: f32,
}

impl WeaponSlot {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            level: 0,
            fire_timer: 0.0,
        }
    }
}

/// Every weapon the current run owns.  At most one slot per kind.
#[derive(Resource, Debug, Clone, Default)]
pub struct Arsenal {
    pub slots: Vec<WeaponSlot>,
    /// Index of the starting weapon; biased in upgrade rolls.
    pub equipped: usize,
}

impl Arsenal {
    /// Fresh arsenal holding only the chosen starting weapon.
    pub fn new(starting: WeaponKind) -> Self {
        Self {
            slots: vec![WeaponSlot::new(starting)],
            equipped: 0,
        }
    }

    pub fn has(&self, kind: WeaponKind) -> bool {
        self.slots.iter().any(|slot| slot.kind == kind)
    }

    pub fn level(&self, kind: WeaponKind) -> Option<u8> {
        self.slots
            .iter()
            .find(|slot| slot.kind == kind)
            .map(|slot| slot.level)
    }

    pub fn equipped_kind(&self) -> Option<WeaponKind> {
        self.slots.get(self.equipped).map(|slot| slot.kind)
    }

    pub fn slot_mut(&mut self, kind: WeaponKind) -> Option<&mut WeaponSlot> {
        self.slots.iter_mut().find(|slot| slot.kind == kind)
    }

    /// Apply a chosen upgrade.  Adding an already-owned kind or upgrading a
    /// missing one is a no-op rather than an error; the option list can be
    /// stale by one frame at most.
    pub fn apply(&mut self, upgrade: UpgradeKind) {
        match upgrade {
            UpgradeKind::AddWeapon(kind) => {
                if !self.has(kind) {
                    self.slots.push(WeaponSlot::new(kind));
                }
            }
            UpgradeKind::UpgradeWeapon(kind) => {
                if let Some(slot) = self.slot_mut(kind) {
                    slot.level = (slot.level + 1).min(WEAPON_MAX_LEVEL);
                }
            }
        }
    }
}

// ── Upgrade options ───────────────────────────────────────────────────────────

/// A single thing an upgrade choice can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeKind {
    AddWeapon(WeaponKind),
    UpgradeWeapon(WeaponKind),
}

/// One card on the level-up screen.
#[derive(Debug, Clone)]
pub struct UpgradeOption {
    pub upgrade: UpgradeKind,
    pub title: String,
    pub detail: String,
}

impl UpgradeOption {
    fn for_upgrade(upgrade: UpgradeKind, arsenal: &Arsenal) -> Self {
        match upgrade {
            UpgradeKind::AddWeapon(kind) => Self {
                upgrade,
                title: format!("NEW: {}", kind.label()),
                detail: kind.blurb().to_string(),
            },
            UpgradeKind::UpgradeWeapon(kind) => {
                let next = arsenal.level(kind).unwrap_or(0) + 1;
                Self {
                    upgrade,
                    title: format!("{} LV{}", kind.label(), next + 1),
                    detail: kind.blurb().to_string(),
                }
            }
        }
    }
}

/// Every upgrade currently possible: add any unowned kind, level any owned
/// kind below max.
pub fn upgrade_candidates(arsenal: &Arsenal) -> Vec<UpgradeKind> {
    let mut candidates = Vec::new();
    for kind in WeaponKind::ALL {
        match arsenal.level(kind) {
            None => candidates.push(UpgradeKind::AddWeapon(kind)),
            Some(level) if level < WEAPON_MAX_LEVEL => {
                candidates.push(UpgradeKind::UpgradeWeapon(kind));
            }
            Some(_) => {}
        }
    }
    candidates
}

fn candidate_kind(upgrade: UpgradeKind) -> WeaponKind {
    match upgrade {
        UpgradeKind::AddWeapon(kind) | UpgradeKind::UpgradeWeapon(kind) => kind,
    }
}

/// Candidate weights: the equipped weapon's candidates share
/// [`UPGRADE_EQUIPPED_WEIGHT`] of the probability mass, the rest split the
/// remainder evenly.  Falls back to uniform when either group is empty.
pub fn candidate_weights(candidates: &[UpgradeKind], arsenal: &Arsenal) -> Vec<f32> {
    let equipped = arsenal.equipped_kind();
    let equipped_count = candidates
        .iter()
        .filter(|c| Some(candidate_kind(**c)) == equipped)
        .count();
    let other_count = candidates.len() - equipped_count;

    if equipped_count == 0 || other_count == 0 {
        return vec![1.0; candidates.len()];
    }

    let equipped_share = UPGRADE_EQUIPPED_WEIGHT / equipped_count as f32;
    let other_share = (1.0 - UPGRADE_EQUIPPED_WEIGHT) / other_count as f32;
    candidates
        .iter()
        .map(|c| {
            if Some(candidate_kind(*c)) == equipped {
                equipped_share
            } else {
                other_share
            }
        })
        .collect()
}

/// Draw up to three distinct upgrade options by weighted sampling without
/// replacement.  Three or fewer candidates are returned whole.
pub fn generate_upgrade_options<R: Rng>(arsenal: &Arsenal, rng: &mut R) -> Vec<UpgradeOption> {
    let mut candidates = upgrade_candidates(arsenal);
    if candidates.len() <= 3 {
        return candidates
            .into_iter()
            .map(|c| UpgradeOption::for_upgrade(c, arsenal))
            .collect();
    }

    let mut weights = candidate_weights(&candidates, arsenal);
    let mut picked = Vec::with_capacity(3);
    for _ in 0..3 {
        let total: f32 = weights.iter().sum();
        let mut roll = rng.gen_range(0.0..total);
        let mut index = candidates.len() - 1;
        for (i, weight) in weights.iter().enumerate() {
            if roll < *weight {
                index = i;
                break;
            }
            roll -= weight;
        }
        picked.push(UpgradeOption::for_upgrade(candidates.remove(index), arsenal));
        weights.remove(index);
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arsenal_holds_one_slot_per_kind() {
        let mut arsenal = Arsenal::new(WeaponKind::Orbit);
        arsenal.apply(UpgradeKind::AddWeapon(WeaponKind::Sweep));
        arsenal.apply(UpgradeKind::AddWeapon(WeaponKind::Sweep));
        assert_eq!(arsenal.slots.len(), 2);
    }

    #[test]
    fn upgrades_saturate_at_max_level() {
        let mut arsenal = Arsenal::new(WeaponKind::Volley);
        for _ in 0..10 {
            arsenal.apply(UpgradeKind::UpgradeWeapon(WeaponKind::Volley));
        }
        assert_eq!(arsenal.level(WeaponKind::Volley), Some(WEAPON_MAX_LEVEL));
    }

    #[test]
    fn upgrading_an_unowned_kind_is_a_no_op() {
        let mut arsenal = Arsenal::new(WeaponKind::Orbit);
        arsenal.apply(UpgradeKind::UpgradeWeapon(WeaponKind::Homing));
        assert!(!arsenal.has(WeaponKind::Homing));
    }

    #[test]
    fn maxed_kinds_drop_out_of_the_candidate_pool() {
        let mut arsenal = Arsenal::new(WeaponKind::Orbit);
        for kind in WeaponKind::ALL {
            arsenal.apply(UpgradeKind::AddWeapon(kind));
            for _ in 0..WEAPON_MAX_LEVEL {
                arsenal.apply(UpgradeKind::UpgradeWeapon(kind));
            }
        }
        assert!(upgrade_candidates(&arsenal).is_empty());
        let options = generate_upgrade_options(&arsenal, &mut rand::thread_rng());
        assert!(options.is_empty());
    }

    #[test]
    fn small_pools_are_returned_whole() {
        let mut arsenal = Arsenal::new(WeaponKind::Orbit);
        // Max out everything except two upgrade candidates.
        for kind in WeaponKind::ALL {
            arsenal.apply(UpgradeKind::AddWeapon(kind));
        }
        for kind in [WeaponKind::Orbit, WeaponKind::Sweep] {
            for _ in 0..WEAPON_MAX_LEVEL {
                arsenal.apply(UpgradeKind::UpgradeWeapon(kind));
            }
        }
        let options = generate_upgrade_options(&arsenal, &mut rand::thread_rng());
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn options_never_repeat_within_a_draw() {
        let arsenal = Arsenal::new(WeaponKind::Orbit);
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let options = generate_upgrade_options(&arsenal, &mut rng);
            assert_eq!(options.len(), 3);
            for i in 0..options.len() {
                for j in (i + 1)..options.len() {
                    assert_ne!(options[i].upgrade, options[j].upgrade);
                }
            }
        }
    }

    #[test]
    fn equipped_weapon_gets_its_reserved_share() {
        // Fresh arsenal: 4 candidates, one of them for the equipped kind.
        let arsenal = Arsenal::new(WeaponKind::Orbit);
        let candidates = upgrade_candidates(&arsenal);
        let weights = candidate_weights(&candidates, &arsenal);
        let equipped_weight: f32 = candidates
            .iter()
            .zip(&weights)
            .filter(|(c, _)| candidate_kind(**c) == WeaponKind::Orbit)
            .map(|(_, w)| *w)
            .sum();
        let total: f32 = weights.iter().sum();
        assert!((equipped_weight / total - UPGRADE_EQUIPPED_WEIGHT).abs() < 1e-6);
    }

    #[test]
    fn first_pick_frequency_converges_to_the_weights() {
        let arsenal = Arsenal::new(WeaponKind::Orbit);
        let mut rng = rand::thread_rng();
        let trials = 100_000;
        let mut equipped_first = 0u32;
        for _ in 0..trials {
            let options = generate_upgrade_options(&arsenal, &mut rng);
            if candidate_kind(options[0].upgrade) == WeaponKind::Orbit {
                equipped_first += 1;
            }
        }
        let observed = equipped_first as f32 / trials as f32;
        assert!(
            (observed - UPGRADE_EQUIPPED_WEIGHT).abs() < 0.02,
            "observed equipped-first rate {observed}"
        );
    }
}

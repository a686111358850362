//! Enemy module: roster, behaviour, wave spawning, and the boss.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`kind`] | [`EnemyKind`] stat tables and the shared [`Enemy`] component |
//! | [`behavior`] | Pursuit, bruiser charges, exploder detonation, contact damage |
//! | [`spawner`] | Timed off-screen waves, weighted kind rolls, the boss trigger |
//! | [`boss`] | Boss movement phases and its blade / volley / orb attack kit |

pub mod behavior;
pub mod boss;
pub mod kind;
pub mod spawner;

pub use behavior::{
    bruiser_charge_system, enemy_contact_damage_system, enemy_pursuit_system,
    exploder_detonation_system, Charge, ExploderFuse,
};
pub use boss::{
    boss_blade_system, boss_movement_system, boss_orb_detonation_system,
    boss_orb_release_system, boss_orb_steer_system, boss_projectile_hit_system,
    boss_support_cleanup_system, boss_volley_system, spawn_boss, Boss, BossArrow, BossBlade,
    BossOrb, BossPhase,
};
pub use kind::{Enemy, EnemyKind};
pub use spawner::{boss_trigger_system, enemy_spawn_system, spawn_enemy, EnemySpawnState};

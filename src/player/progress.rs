//! Progression systems: invincibility countdown, level-up benefits, the
//! level-up screen trigger, and the death transition.

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::menu::{GameState, UpgradeOptions};
use crate::player::state::{PendingLevelUps, Player, PlayerHealth};
use crate::session::RunClock;
use crate::weapons::{generate_upgrade_options, Arsenal};

/// Count the invincibility window down each frame.
pub fn tick_invincibility_system(
    clock: Res<RunClock>,
    mut query: Query<&mut PlayerHealth, With<Player>>,
) {
    let Ok(mut health) = query.single_mut() else {
        return;
    };
    if health.inv_timer > 0.0 {
        health.inv_timer = (health.inv_timer - clock.dt).max(0.0);
    }
}

/// Grant the per-level stat benefits for `levels` level-ups: raise max HP,
/// then restore a fraction of the resulting deficit.
pub fn apply_level_benefits(health: &mut PlayerHealth, levels: u32, config: &GameConfig) {
    for _ in 0..levels {
        health.max_hp += config.level_max_hp_bonus;
        let deficit = health.max_hp - health.hp;
        health.heal(deficit * config.level_heal_fraction);
    }
}

/// Open the level-up screen while upgrade choices are owed.
///
/// Generates a fresh option set and transitions to `LevelUp`; the screen
/// itself decrements [`PendingLevelUps`] per choice and returns here if more
/// are queued.  An empty candidate pool (everything owned and maxed) clears
/// the queue on the spot.
pub fn level_up_trigger_system(
    arsenal: Res<Arsenal>,
    mut options: ResMut<UpgradeOptions>,
    mut pending: ResMut<PendingLevelUps>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if pending.0 == 0 {
        return;
    }

    let generated = generate_upgrade_options(&arsenal, &mut rand::thread_rng());
    if generated.is_empty() {
        pending.0 = 0;
        return;
    }

    options.0 = generated;
    next_state.set(GameState::LevelUp);
}

/// End the run when the player's HP is exhausted.
pub fn player_death_system(
    query: Query<&PlayerHealth, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(health) = query.single() else {
        return;
    };
    if health.hp <= 0.0 {
        info!("Player died; run over");
        next_state.set(GameState::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_benefits_raise_max_hp_and_partially_heal() {
        let config = GameConfig::default();
        let mut health = PlayerHealth {
            hp: 40.0,
            max_hp: 100.0,
            ..Default::default()
        };
        apply_level_benefits(&mut health, 1, &config);
        assert_eq!(health.max_hp, 125.0);
        // Deficit after the raise is 85; 75% of it restored.
        assert!((health.hp - (40.0 + 85.0 * 0.75)).abs() < 1e-3);
    }

    #[test]
    fn level_benefits_stack_per_level() {
        let config = GameConfig::default();
        let mut health = PlayerHealth {
            hp: 100.0,
            max_hp: 100.0,
            ..Default::default()
        };
        apply_level_benefits(&mut health, 3, &config);
        assert_eq!(health.max_hp, 175.0);
        assert!(health.hp <= health.max_hp);
        assert!(health.hp > 100.0);
    }
}

//! Player ECS components and input resources.

use bevy::prelude::*;

use crate::constants::{EXP_TO_FIRST_LEVEL, PLAYER_INVINCIBILITY_SECS, PLAYER_MAX_HP};

/// Marker component identifying the player entity.
#[derive(Component, Debug)]
pub struct Player;

/// Player hit points and the post-hit invincibility window.
#[derive(Component, Debug, Clone)]
pub struct PlayerHealth {
    pub hp: f32,
    pub max_hp: f32,
    /// Seconds of invincibility remaining; damage is ignored while positive.
    pub inv_timer: f32,
    /// Length of the window opened by each landed hit, from
    /// `GameConfig::player_invincibility_secs` at spawn.
    pub inv_window: f32,
}

impl Default for PlayerHealth {
    fn default() -> Self {
        Self {
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            inv_timer: 0.0,
            inv_window: PLAYER_INVINCIBILITY_SECS,
        }
    }
}

impl PlayerHealth {
    /// True while the invincibility window is open.
    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.inv_timer > 0.0
    }

    /// Apply `amount` damage unless invincible, flooring HP at zero.  A
    /// successful hit opens a new invincibility window.  Returns `true` when
    /// the hit landed.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.hp = (self.hp - amount).max(0.0);
        self.inv_timer = self.inv_window;
        true
    }

    /// Restore `amount` HP, capped at `max_hp`.
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }
}

/// Level, accumulated experience, and the next threshold.
#[derive(Component, Debug, Clone)]
pub struct PlayerProgress {
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            level: 1,
            exp: 0,
            exp_to_next: EXP_TO_FIRST_LEVEL,
        }
    }
}

impl PlayerProgress {
    /// Bank `amount` experience and resolve every threshold it crosses.
    ///
    /// Each crossing consumes the current threshold from `exp`, increments
    /// `level`, and doubles the threshold.  Returns the number of levels
    /// gained, which the caller queues as pending upgrade choices.
    pub fn gain_exp(&mut self, amount: u32) -> u32 {
        self.exp += amount;
        let mut levels = 0;
        while self.exp >= self.exp_to_next {
            self.exp -= self.exp_to_next;
            self.exp_to_next *= 2;
            self.level += 1;
            levels += 1;
        }
        levels
    }
}

// ── Input resources ───────────────────────────────────────────────────────────

/// Normalised movement intent in `[-1, 1]^2`, written by the keyboard and
/// gamepad systems and consumed by the movement system.
///
/// Keeping input behind a plain resource lets tests drive movement without
/// synthesising device events.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputAxis(pub Vec2);

/// The gamepad entity movement input is read from, if any is connected.
#[derive(Resource, Debug, Default)]
pub struct PreferredGamepad(pub Option<Entity>);

/// Level-ups earned but not yet spent on an upgrade choice.
///
/// Drained one at a time by the level-up screen; a large orb can push this
/// past 1 and the screen re-opens until the queue empties.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PendingLevelUps(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invincibility_gates_damage() {
        let mut health = PlayerHealth::default();
        assert!(health.take_damage(10.0));
        assert_eq!(health.hp, PLAYER_MAX_HP - 10.0);
        // The follow-up hit inside the window is ignored.
        assert!(!health.take_damage(10.0));
        assert_eq!(health.hp, PLAYER_MAX_HP - 10.0);
        // Window closed; damage lands again.
        health.inv_timer = 0.0;
        assert!(health.take_damage(10.0));
        assert_eq!(health.hp, PLAYER_MAX_HP - 20.0);
    }

    #[test]
    fn overkill_floors_hp_at_zero() {
        let mut health = PlayerHealth::default();
        assert!(health.take_damage(health.max_hp + 40.0));
        assert_eq!(health.hp, 0.0);
    }

    #[test]
    fn the_invincibility_window_length_is_per_player() {
        let mut health = PlayerHealth {
            inv_window: 2.0,
            ..Default::default()
        };
        health.take_damage(10.0);
        assert_eq!(health.inv_timer, 2.0);
    }

    #[test]
    fn heal_caps_at_max_hp() {
        let mut health = PlayerHealth::default();
        health.take_damage(30.0);
        health.heal(1000.0);
        assert_eq!(health.hp, health.max_hp);
    }

    #[test]
    fn gain_exp_doubles_threshold_each_level() {
        let mut progress = PlayerProgress::default();
        assert_eq!(progress.gain_exp(EXP_TO_FIRST_LEVEL - 1), 0);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.gain_exp(1), 1);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.exp, 0);
        assert_eq!(progress.exp_to_next, EXP_TO_FIRST_LEVEL * 2);
    }

    #[test]
    fn one_large_award_can_cross_multiple_thresholds() {
        let mut progress = PlayerProgress::default();
        // 200 + 400 + 600 crosses levels 2 and 3 with 600 left toward 800.
        let levels = progress.gain_exp(1200);
        assert_eq!(levels, 2);
        assert_eq!(progress.level, 3);
        assert_eq!(progress.exp, 600);
        assert_eq!(progress.exp_to_next, 800);
    }
}

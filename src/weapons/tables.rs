//! Per-level weapon tuning tables.
//!
//! Each weapon has four levels (0 through 3) and one row per level.  Level
//! effects are pure data; the weapon systems index these tables and never
//! branch on level.

/// Orbit weapon: blade count and blade scale per level.
#[derive(Debug, Clone, Copy)]
pub struct OrbitRow {
    pub blades: u32,
    pub scale: f32,
}

pub const ORBIT: [OrbitRow; 4] = [
    OrbitRow {
        blades: 1,
        scale: 1.0,
    },
    OrbitRow {
        blades: 3,
        scale: 1.2,
    },
    OrbitRow {
        blades: 5,
        scale: 1.5,
    },
    OrbitRow {
        blades: 7,
        scale: 2.0,
    },
];

/// Sweep weapon: reach, damage multiplier, cadence, and lifesteal per level.
#[derive(Debug, Clone, Copy)]
pub struct SweepRow {
    pub radius: f32,
    pub damage_mult: f32,
    pub interval: f32,
    pub lifesteal: f32,
}

pub const SWEEP: [SweepRow; 4] = [
    SweepRow {
        radius: 120.0,
        damage_mult: 1.0,
        interval: 1.5,
        lifesteal: 0.10,
    },
    SweepRow {
        radius: 140.0,
        damage_mult: 1.3,
        interval: 1.2,
        lifesteal: 0.10,
    },
    SweepRow {
        radius: 170.0,
        damage_mult: 1.6,
        interval: 0.9,
        lifesteal: 0.15,
    },
    SweepRow {
        radius: 200.0,
        damage_mult: 1.8,
        interval: 0.5,
        lifesteal: 0.20,
    },
];

/// Volley weapon: arrow count, cadence, and critical hits per level.
#[derive(Debug, Clone, Copy)]
pub struct VolleyRow {
    pub arrows: u32,
    pub interval: f32,
    pub crit_chance: f32,
    pub crit_mult: f32,
    pub damage: f32,
}

pub const VOLLEY: [VolleyRow; 4] = [
    VolleyRow {
        arrows: 3,
        interval: 1.0,
        crit_chance: 0.20,
        crit_mult: 2.0,
        damage: 10.0,
    },
    VolleyRow {
        arrows: 5,
        interval: 0.75,
        crit_chance: 0.25,
        crit_mult: 2.5,
        damage: 12.0,
    },
    VolleyRow {
        arrows: 9,
        interval: 0.5,
        crit_chance: 0.30,
        crit_mult: 3.0,
        damage: 14.0,
    },
    VolleyRow {
        arrows: 15,
        interval: 0.25,
        crit_chance: 0.35,
        crit_mult: 4.0,
        damage: 16.0,
    },
];

/// Homing weapon: burst size and damage multiplier per level.
#[derive(Debug, Clone, Copy)]
pub struct HomingRow {
    pub burst: u32,
    pub damage_mult: f32,
}

pub const HOMING: [HomingRow; 4] = [
    HomingRow {
        burst: 1,
        damage_mult: 1.0,
    },
    HomingRow {
        burst: 3,
        damage_mult: 1.2,
    },
    HomingRow {
        burst: 7,
        damage_mult: 1.6,
    },
    HomingRow {
        burst: 12,
        damage_mult: 2.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_has_four_monotone_levels() {
        for window in ORBIT.windows(2) {
            assert!(window[1].blades > window[0].blades);
            assert!(window[1].scale >= window[0].scale);
        }
        for window in SWEEP.windows(2) {
            assert!(window[1].radius > window[0].radius);
            assert!(window[1].damage_mult > window[0].damage_mult);
            assert!(window[1].interval < window[0].interval);
            assert!(window[1].lifesteal >= window[0].lifesteal);
        }
        for window in VOLLEY.windows(2) {
            assert!(window[1].arrows > window[0].arrows);
            assert!(window[1].interval < window[0].interval);
            assert!(window[1].crit_chance > window[0].crit_chance);
        }
        for window in HOMING.windows(2) {
            assert!(window[1].burst > window[0].burst);
            assert!(window[1].damage_mult > window[0].damage_mult);
        }
    }
}

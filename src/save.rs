//! Save slots: versioned TOML snapshots of a run in progress.
//!
//! A snapshot captures the run clock, the player, and the arsenal.  The
//! enemy field is deliberately not persisted; loading drops you back in at
//! the saved time with a clear arena and the spawner picks up from there.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::enemy::{Enemy, EnemySpawnState};
use crate::menu::GameState;
use crate::pickups::ExpOrb;
use crate::player::{PendingLevelUps, Player, PlayerHealth, PlayerProgress};
use crate::session::{Lifetime, RunClock};
use crate::weapons::{
    Arsenal, Arrow, HomingMissile, OrbitBlade, WeaponKind, WeaponSlot, WEAPON_MAX_LEVEL,
};

pub const SAVE_SLOT_COUNT: u8 = 3;
const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone)]
pub struct SaveSlotMetadata {
    pub slot: u8,
    pub exists: bool,
    pub loadable: bool,
    pub level: Option<u32>,
    pub elapsed_secs: Option<f32>,
    pub saved_at_unix: Option<u64>,
    pub status: String,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct SaveSlotRequest {
    pub slot: u8,
}

/// Snapshot loaded from disk, waiting to be applied on the next Playing frame.
#[derive(Resource, Default, Debug, Clone)]
pub struct PendingLoadedSnapshot(pub Option<SaveSnapshot>);

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SaveSnapshot {
    pub version: u32,
    pub saved_at_unix: u64,
    pub elapsed_secs: f32,
    pub player: PlayerSnapshot,
    pub weapons: Vec<WeaponSlotSnapshot>,
    pub equipped: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlayerSnapshot {
    pub pos: [f32; 2],
    pub hp: f32,
    pub max_hp: f32,
    pub inv_timer: f32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct WeaponSlotSnapshot {
    pub kind: WeaponKind,
    pub level: u8,
}

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingLoadedSnapshot>()
            .add_message::<SaveSlotRequest>()
            .add_systems(
                Update,
                handle_save_slot_requests_system.run_if(in_state(GameState::SaveSelect)),
            )
            .add_systems(
                Update,
                apply_pending_loaded_snapshot_system.run_if(in_state(GameState::Playing)),
            );
    }
}

fn save_dir() -> PathBuf {
    PathBuf::from("saves")
}

fn slot_path(slot: u8) -> PathBuf {
    save_dir().join(format!("slot_{slot}.toml"))
}

pub fn slot_exists(slot: u8) -> bool {
    if !(1..=SAVE_SLOT_COUNT).contains(&slot) {
        return false;
    }
    slot_path(slot).exists()
}

pub fn load_slot(slot: u8) -> Result<SaveSnapshot, String> {
    if !(1..=SAVE_SLOT_COUNT).contains(&slot) {
        return Err(format!("invalid slot {slot}"));
    }

    let path = slot_path(slot);
    let contents = fs::read_to_string(&path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;

    parse_snapshot_with_migration(&contents)
}

pub fn slot_metadata(slot: u8) -> SaveSlotMetadata {
    if !(1..=SAVE_SLOT_COUNT).contains(&slot) {
        return SaveSlotMetadata {
            slot,
            exists: false,
            loadable: false,
            level: None,
            elapsed_secs: None,
            saved_at_unix: None,
            status: "INVALID SLOT".to_string(),
        };
    }

    if !slot_exists(slot) {
        return SaveSlotMetadata {
            slot,
            exists: false,
            loadable: false,
            level: None,
            elapsed_secs: None,
            saved_at_unix: None,
            status: "EMPTY".to_string(),
        };
    }

    match load_slot(slot) {
        Ok(snapshot) => SaveSlotMetadata {
            slot,
            exists: true,
            loadable: true,
            level: Some(snapshot.player.level),
            elapsed_secs: Some(snapshot.elapsed_secs),
            saved_at_unix: Some(snapshot.saved_at_unix),
            status: "READY".to_string(),
        },
        Err(_) => SaveSlotMetadata {
            slot,
            exists: true,
            loadable: false,
            level: None,
            elapsed_secs: None,
            saved_at_unix: None,
            status: "CORRUPT".to_string(),
        },
    }
}

fn current_unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn parse_snapshot_with_migration(contents: &str) -> Result<SaveSnapshot, String> {
    let mut value: toml::Value =
        toml::from_str(contents).map_err(|err| format!("failed to parse save TOML: {err}"))?;

    migrate_snapshot_value(&mut value)?;

    value
        .try_into::<SaveSnapshot>()
        .map_err(|err| format!("failed to decode migrated save snapshot: {err}"))
}

fn migrate_snapshot_value(value: &mut toml::Value) -> Result<(), String> {
    let table = value
        .as_table_mut()
        .ok_or_else(|| "save file root must be a TOML table".to_string())?;

    if !table.contains_key("version") {
        table.insert(
            "version".to_string(),
            toml::Value::Integer(SAVE_VERSION as i64),
        );
    }

    if !table.contains_key("saved_at_unix") {
        table.insert("saved_at_unix".to_string(), toml::Value::Integer(0));
    }

    let version = table
        .get("version")
        .and_then(toml::Value::as_integer)
        .ok_or_else(|| "save version is missing or invalid".to_string())?;

    if version != SAVE_VERSION as i64 {
        return Err(format!(
            "unsupported save version {} (expected {})",
            version, SAVE_VERSION
        ));
    }

    Ok(())
}

fn write_slot(slot: u8, snapshot: &SaveSnapshot) -> Result<(), String> {
    if !(1..=SAVE_SLOT_COUNT).contains(&slot) {
        return Err(format!("invalid slot {slot}"));
    }

    fs::create_dir_all(save_dir()).map_err(|err| format!("failed to create save dir: {err}"))?;

    let serialized = toml::to_string_pretty(snapshot)
        .map_err(|err| format!("failed to serialize save TOML: {err}"))?;

    let path = slot_path(slot);
    fs::write(&path, serialized).map_err(|err| format!("failed to write {}: {err}", path.display()))
}

pub fn handle_save_slot_requests_system(
    mut requests: MessageReader<SaveSlotRequest>,
    clock: Res<RunClock>,
    arsenal: Res<Arsenal>,
    q_player: Query<(&Transform, &PlayerHealth, &PlayerProgress), With<Player>>,
) {
    for request in requests.read() {
        let Ok((transform, health, progress)) = q_player.single() else {
            warn!("No player to save; ignoring slot {} request", request.slot);
            continue;
        };

        let snapshot = SaveSnapshot {
            version: SAVE_VERSION,
            saved_at_unix: current_unix_timestamp(),
            elapsed_secs: clock.elapsed,
            player: PlayerSnapshot {
                pos: [transform.translation.x, transform.translation.y],
                hp: health.hp,
                max_hp: health.max_hp,
                inv_timer: health.inv_timer,
                level: progress.level,
                exp: progress.exp,
                exp_to_next: progress.exp_to_next,
            },
            weapons: arsenal
                .slots
                .iter()
                .map(|slot| WeaponSlotSnapshot {
                    kind: slot.kind,
                    level: slot.level,
                })
                .collect(),
            equipped: arsenal.equipped,
        };

        match write_slot(request.slot, &snapshot) {
            Ok(()) => {
                info!("Saved run to slot {}", request.slot);
            }
            Err(err) => {
                error!("Failed to save run to slot {}: {}", request.slot, err);
            }
        }
    }
}

/// Apply a loaded snapshot on the first Playing frame after a load.
///
/// Runs every Playing frame and returns silently when nothing is pending;
/// `OnEnter(Playing)` also fires on pause-resume, so this cannot live there.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn apply_pending_loaded_snapshot_system(
    mut commands: Commands,
    mut pending: ResMut<PendingLoadedSnapshot>,
    config: Res<GameConfig>,
    mut clock: ResMut<RunClock>,
    field: Query<
        Entity,
        Or<(
            With<Player>,
            With<Enemy>,
            With<ExpOrb>,
            With<Arrow>,
            With<HomingMissile>,
            With<OrbitBlade>,
            With<Lifetime>,
        )>,
    >,
) {
    let Some(snapshot) = pending.0.take() else {
        return;
    };

    for entity in field.iter() {
        commands.entity(entity).despawn();
    }

    clock.elapsed = snapshot.elapsed_secs;
    commands.insert_resource(EnemySpawnState::default());
    commands.insert_resource(PendingLevelUps::default());

    let mut arsenal = Arsenal {
        slots: snapshot
            .weapons
            .iter()
            .map(|snap| WeaponSlot {
                kind: snap.kind,
                level: snap.level.min(WEAPON_MAX_LEVEL),
                fire_timer: 0.0,
            })
            .collect(),
        equipped: snapshot.equipped,
    };
    if arsenal.slots.is_empty() {
        arsenal = Arsenal::new(WeaponKind::Orbit);
    }
    if arsenal.equipped >= arsenal.slots.len() {
        arsenal.equipped = 0;
    }
    commands.insert_resource(arsenal);

    let pos_x = snapshot.player.pos[0]
        .clamp(config.player_radius, config.arena_width - config.player_radius);
    let pos_y = snapshot.player.pos[1]
        .clamp(config.player_radius, config.arena_height - config.player_radius);
    commands.spawn((
        Player,
        PlayerHealth {
            hp: snapshot.player.hp.min(snapshot.player.max_hp),
            max_hp: snapshot.player.max_hp,
            inv_timer: snapshot.player.inv_timer,
            inv_window: config.player_invincibility_secs,
        },
        PlayerProgress {
            level: snapshot.player.level.max(1),
            exp: snapshot.player.exp,
            exp_to_next: snapshot.player.exp_to_next.max(1),
        },
        Transform::from_xyz(pos_x, pos_y, 1.0),
        Visibility::default(),
    ));

    info!("Loaded snapshot at {:.0}s of run time", snapshot.elapsed_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> SaveSnapshot {
        SaveSnapshot {
            version: SAVE_VERSION,
            saved_at_unix: 1_700_000_000,
            elapsed_secs: 123.5,
            player: PlayerSnapshot {
                pos: [800.0, 450.0],
                hp: 80.0,
                max_hp: 125.0,
                inv_timer: 0.0,
                level: 2,
                exp: 40,
                exp_to_next: 400,
            },
            weapons: vec![
                WeaponSlotSnapshot {
                    kind: WeaponKind::Orbit,
                    level: 1,
                },
                WeaponSlotSnapshot {
                    kind: WeaponKind::Volley,
                    level: 0,
                },
            ],
            equipped: 0,
        }
    }

    #[test]
    fn snapshot_round_trips_through_toml() {
        let snapshot = sample_snapshot();
        let serialized = toml::to_string_pretty(&snapshot).unwrap();
        let parsed = parse_snapshot_with_migration(&serialized).unwrap();
        assert_eq!(parsed.elapsed_secs, snapshot.elapsed_secs);
        assert_eq!(parsed.player.level, 2);
        assert_eq!(parsed.weapons.len(), 2);
        assert_eq!(parsed.weapons[1].kind, WeaponKind::Volley);
    }

    #[test]
    fn corrupt_toml_fails_closed() {
        assert!(parse_snapshot_with_migration("not toml at all [[[").is_err());
        assert!(parse_snapshot_with_migration("version = 1").is_err());
    }

    #[test]
    fn future_versions_are_rejected() {
        let mut serialized = toml::to_string_pretty(&sample_snapshot()).unwrap();
        serialized = serialized.replace("version = 1", "version = 99");
        let err = parse_snapshot_with_migration(&serialized).unwrap_err();
        assert!(err.contains("unsupported save version"));
    }

    #[test]
    fn missing_timestamp_is_backfilled() {
        let serialized = toml::to_string_pretty(&sample_snapshot()).unwrap();
        let stripped: String = serialized
            .lines()
            .filter(|line| !line.starts_with("saved_at_unix"))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed = parse_snapshot_with_migration(&stripped).unwrap();
        assert_eq!(parsed.saved_at_unix, 0);
    }

    #[test]
    fn out_of_range_slots_are_rejected() {
        assert!(!slot_exists(0));
        assert!(!slot_exists(SAVE_SLOT_COUNT + 1));
        assert!(load_slot(0).is_err());
        assert_eq!(slot_metadata(0).status, "INVALID SLOT");
    }
}

//! # Save Module
//!
//! World persistence as a sparse diff: the file stores the seed, the
//! generator name, and only the voxels that differ from the terrain the
//! generator would produce. Reloading regenerates the baseline from
//! `(seed, generator)` and replays the recorded edits on top.
//!
//! Because the diff is *relative* to procedural terrain, it is only valid
//! against the exact generator constants it was written with. Every file is
//! stamped with [`GENERATOR_VERSION`]; loading a file with a different stamp
//! is refused outright rather than silently reinterpreting old edits against
//! new terrain.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::inventory::Inventory;
use crate::voxels::block::block_type::BlockType;
use crate::voxels::block::BlockTypeSize;
use crate::voxels::chunk::{CHUNK_HEIGHT, CHUNK_SIZE};
use crate::voxels::terrain::{block_for_height, GeneratorKind, GENERATOR_VERSION};
use crate::voxels::world::World;

/// Version of the save file layout itself.
pub const SAVE_VERSION: u32 = 1;

/// Player state carried through save files.
///
/// The core does not simulate the player; this is a plain data record the
/// player/input collaborator fills and consumes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// World-space position.
    pub position: [f32; 3],
    /// Euler rotation (pitch, yaw, roll).
    pub rotation: [f32; 3],
    /// Whether flight mode was active.
    pub flying: bool,
    /// Hotbar and backpack contents, including the selected slot.
    pub inventory: Inventory,
}

/// The serialized world: regeneration inputs plus the edit diff.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorldSave {
    /// Save layout version.
    pub version: u32,
    /// Terrain seed.
    pub seed: u32,
    /// Generator name; with the seed it reproduces the baseline terrain.
    pub generator: GeneratorKind,
    /// Generator constants stamp the file was written under.
    pub generator_version: u32,
    /// Player state, if one was attached.
    pub player: Option<PlayerSnapshot>,
    /// Edited voxels keyed `"cx,cz,lx,ly,lz"`, valued by block id.
    pub changes: BTreeMap<String, BlockTypeSize>,
}

/// Why a save file could not be produced or applied.
#[derive(Debug)]
pub enum SaveError {
    /// The file was not valid JSON for the expected layout.
    Json(serde_json::Error),
    /// The file uses a save layout this build does not understand.
    UnsupportedVersion(u32),
    /// The file's diff was computed against different generator constants;
    /// applying it would corrupt the world silently.
    GeneratorVersionMismatch {
        /// The stamp this build writes.
        expected: u32,
        /// The stamp found in the file.
        found: u32,
    },
    /// A diff entry key did not parse as five integers.
    BadChangeKey(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Json(err) => write!(f, "malformed save file: {}", err),
            SaveError::UnsupportedVersion(found) => {
                write!(f, "unsupported save version {} (expected {})", found, SAVE_VERSION)
            }
            SaveError::GeneratorVersionMismatch { expected, found } => write!(
                f,
                "save was written for generator version {} but this build has {}",
                found, expected
            ),
            SaveError::BadChangeKey(key) => write!(f, "malformed change key {:?}", key),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        SaveError::Json(err)
    }
}

/// Draws a fresh random world seed.
pub fn fresh_seed() -> u32 {
    fastrand::u32(..1_000_000)
}

/// Captures the world as a sparse diff against its own baseline terrain.
///
/// Every loaded chunk is compared voxel-by-voxel with what the generator
/// would produce; only mismatches are recorded. Chunks that were never
/// edited contribute nothing.
pub fn save_world(world: &World, player: Option<&PlayerSnapshot>) -> WorldSave {
    let mut changes = BTreeMap::new();

    for chunk in world.chunks() {
        let position = chunk.position();
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let world_x = position.x * CHUNK_SIZE + x;
                let world_z = position.y * CHUNK_SIZE + z;
                let height = world.generator().height(world_x, world_z, world.seed());

                for y in 0..CHUNK_HEIGHT {
                    let actual = chunk.get(x, y, z);
                    if actual != block_for_height(y, height) {
                        let key = format!("{},{},{},{},{}", position.x, position.y, x, y, z);
                        changes.insert(key, actual.id());
                    }
                }
            }
        }
    }

    log::info!(
        "saved world: seed {}, {} edited voxels across {} chunks",
        world.seed(),
        changes.len(),
        world.loaded_chunk_count()
    );

    WorldSave {
        version: SAVE_VERSION,
        seed: world.seed(),
        generator: world.generator(),
        generator_version: GENERATOR_VERSION,
        player: player.cloned(),
        changes,
    }
}

/// Serializes the world (and optional player state) to JSON.
pub fn to_json(world: &World, player: Option<&PlayerSnapshot>) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(&save_world(world, player))?)
}

fn parse_change_key(key: &str) -> Option<(i32, i32, i32, i32, i32)> {
    let mut parts = key.split(',').map(|p| p.trim().parse::<i32>());
    let mut next = || parts.next()?.ok();
    let result = (next()?, next()?, next()?, next()?, next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(result)
}

/// Applies a parsed save to the world.
///
/// Resets the world to the file's `(seed, generator)`, creates every chunk a
/// diff entry touches, and replays the edits through the normal write path,
/// which defers all remeshing into the dirty queue, so a file with thousands
/// of edits costs chunk creation plus budgeted rebuilds, not one mesh build
/// per edit. Returns the player snapshot for the player collaborator.
pub fn apply_save(save: WorldSave, world: &mut World) -> Result<Option<PlayerSnapshot>, SaveError> {
    if save.version != SAVE_VERSION {
        return Err(SaveError::UnsupportedVersion(save.version));
    }
    if save.generator_version != GENERATOR_VERSION {
        return Err(SaveError::GeneratorVersionMismatch {
            expected: GENERATOR_VERSION,
            found: save.generator_version,
        });
    }

    world.reset(save.seed, save.generator);

    for (key, id) in &save.changes {
        let (chunk_x, chunk_z, local_x, local_y, local_z) = match parse_change_key(key) {
            Some(parts) => parts,
            None => return Err(SaveError::BadChangeKey(key.clone())),
        };
        world.create_chunk(chunk_x, chunk_z);
        world.set_block(
            chunk_x * CHUNK_SIZE + local_x,
            local_y,
            chunk_z * CHUNK_SIZE + local_z,
            BlockType::from_id(*id),
        );
    }

    log::info!(
        "loaded world: seed {}, {} edits replayed, {} rebuilds queued",
        save.seed,
        save.changes.len(),
        world.pending_rebuilds()
    );
    Ok(save.player)
}

/// Parses JSON and applies it to the world.
pub fn load_world(json: &str, world: &mut World) -> Result<Option<PlayerSnapshot>, SaveError> {
    let save: WorldSave = serde_json::from_str(json)?;
    apply_save(save, world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::inventory::Inventory;

    fn test_world(seed: u32) -> World {
        World::new(seed, GeneratorKind::Classic, WorldConfig::default())
    }

    #[test]
    fn untouched_world_saves_an_empty_diff() {
        let mut world = test_world(77);
        world.create_chunk(0, 0);
        world.create_chunk(-1, 2);

        let save = save_world(&world, None);
        assert!(save.changes.is_empty());
        assert_eq!(save.seed, 77);
        assert_eq!(save.generator_version, GENERATOR_VERSION);
    }

    #[test]
    fn only_edited_voxels_are_recorded() {
        let mut world = test_world(77);
        world.create_chunk(0, 0);

        // One placed block, one broken baseline block.
        world.set_block(3, 60, 3, BlockType::PLANKS);
        let h = GeneratorKind::Classic.height(5, 5, 77);
        world.set_block(5, h - 1, 5, BlockType::AIR);

        let save = save_world(&world, None);
        assert_eq!(save.changes.len(), 2);
        assert_eq!(
            save.changes.get("0,0,3,60,3"),
            Some(&BlockType::PLANKS.id())
        );
        assert_eq!(
            save.changes.get(&format!("0,0,5,{},5", h - 1)),
            Some(&BlockType::AIR.id())
        );
    }

    #[test]
    fn round_trip_restores_edits_and_player() {
        let mut world = test_world(9001);
        world.create_chunk(0, 0);
        world.create_chunk(-1, 0);
        world.set_block(3, 60, 3, BlockType::GLASS);
        world.set_block(-7, 55, 9, BlockType::WOOD);

        let mut inventory = Inventory::with_default_blocks();
        inventory.select_slot(2);
        let player = PlayerSnapshot {
            position: [3.5, 45.0, 3.5],
            rotation: [0.0, 1.57, 0.0],
            flying: true,
            inventory,
        };

        let json = to_json(&world, Some(&player)).unwrap();

        let mut restored = test_world(0);
        let restored_player = load_world(&json, &mut restored).unwrap();
        assert_eq!(restored.seed(), 9001);
        assert_eq!(restored.generator(), GeneratorKind::Classic);
        assert_eq!(restored_player.as_ref(), Some(&player));
        assert_eq!(restored.get_block(3, 60, 3), BlockType::GLASS);
        assert_eq!(restored.get_block(-7, 55, 9), BlockType::WOOD);

        // Replay defers remeshing into the dirty queue.
        assert!(restored.pending_rebuilds() > 0);
        while restored.rebuild_dirty_chunks() > 0 {}
        assert_eq!(restored.pending_rebuilds(), 0);
    }

    #[test]
    fn baseline_terrain_is_regenerated_not_stored() {
        let mut world = test_world(123);
        world.create_chunk(0, 0);
        world.set_block(0, 62, 0, BlockType::STONE);

        let json = to_json(&world, None).unwrap();
        let mut restored = test_world(0);
        load_world(&json, &mut restored).unwrap();

        // The baseline column matches regeneration everywhere else.
        let h = GeneratorKind::Classic.height(8, 8, 123);
        assert_eq!(restored.get_block(8, h - 1, 8), BlockType::GRASS);
        assert_eq!(restored.get_block(8, h - 6, 8), BlockType::STONE);
    }

    #[test]
    fn generator_version_mismatch_is_refused() {
        let mut world = test_world(1);
        world.create_chunk(0, 0);
        let mut save = save_world(&world, None);
        save.generator_version += 1;
        let json = serde_json::to_string(&save).unwrap();

        let mut target = test_world(0);
        match load_world(&json, &mut target) {
            Err(SaveError::GeneratorVersionMismatch { expected, found }) => {
                assert_eq!(expected, GENERATOR_VERSION);
                assert_eq!(found, GENERATOR_VERSION + 1);
            }
            other => panic!("expected a generator mismatch, got {:?}", other.err()),
        }
    }

    #[test]
    fn unsupported_save_version_is_refused() {
        let mut world = test_world(1);
        let mut save = save_world(&world, None);
        save.version = SAVE_VERSION + 5;
        let json = serde_json::to_string(&save).unwrap();
        assert!(matches!(
            load_world(&json, &mut world),
            Err(SaveError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn unknown_generator_names_are_refused() {
        let json = r#"{
            "version": 1,
            "seed": 5,
            "generator": "flatlands",
            "generator_version": 1,
            "player": null,
            "changes": {}
        }"#;
        let mut world = test_world(0);
        assert!(matches!(
            load_world(json, &mut world),
            Err(SaveError::Json(_))
        ));
    }

    #[test]
    fn malformed_change_keys_are_refused() {
        let json = format!(
            r#"{{
                "version": 1,
                "seed": 5,
                "generator": "classic",
                "generator_version": {},
                "player": null,
                "changes": {{ "0,0,three,4,5": 3 }}
            }}"#,
            GENERATOR_VERSION
        );
        let mut world = test_world(0);
        assert!(matches!(
            load_world(&json, &mut world),
            Err(SaveError::BadChangeKey(_))
        ));
    }
}

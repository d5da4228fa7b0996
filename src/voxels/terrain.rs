//! # Terrain Generation Module
//!
//! Height-field generators for the unmodified baseline terrain. Every
//! generator is a pure function of `(world_x, world_z, seed)`: two worlds
//! built from the same seed and generator produce byte-identical chunks, and
//! the save format depends on that to store only player edits.
//!
//! Because saved diffs are interpreted *relative to* regenerated terrain, any
//! change to the constants below is a save-breaking change:
//! [`GENERATOR_VERSION`] must be bumped whenever they move, and loading
//! refuses diffs stamped with a different version.

use noise::{NoiseFn, Perlin};
use phf::phf_map;
use serde::{Deserialize, Serialize};

use super::block::block_type::BlockType;
use super::chunk::CHUNK_HEIGHT;

/// Version stamp written into save files.
///
/// Bump this whenever any generator constant changes; old diffs would
/// otherwise be silently reinterpreted against different baseline terrain.
pub const GENERATOR_VERSION: u32 = 1;

/// The available height-field generators.
///
/// Serialized by name into save files so a reloaded world regenerates the
/// same baseline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// The default rolling terrain: two sine/cosine octaves.
    Classic,
    /// Taller, lower-frequency hills.
    Hilly,
    /// Perlin-noise terrain.
    Perlin,
}

/// Maps generator names (as stored in save files and world options) to kinds.
static GENERATORS: phf::Map<&'static str, GeneratorKind> = phf_map! {
    "classic" => GeneratorKind::Classic,
    "hilly" => GeneratorKind::Hilly,
    "perlin" => GeneratorKind::Perlin,
};

impl GeneratorKind {
    /// Looks up a generator by its registered name.
    pub fn by_name(name: &str) -> Option<GeneratorKind> {
        GENERATORS.get(name).copied()
    }

    /// The registered name of this generator.
    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Classic => "classic",
            GeneratorKind::Hilly => "hilly",
            GeneratorKind::Perlin => "perlin",
        }
    }

    /// Computes the surface height of the column at `(world_x, world_z)`.
    ///
    /// Deterministic and side-effect-free; callable concurrently for disjoint
    /// inputs. The result is the y of the first air voxel above the column.
    pub fn height(self, world_x: i32, world_z: i32, seed: u32) -> i32 {
        let x = world_x as f64;
        let z = world_z as f64;
        let s = seed as f64;
        let base = (CHUNK_HEIGHT / 2) as f64;
        match self {
            GeneratorKind::Classic => {
                let n = (x * 0.1 + s).sin() * (z * 0.1 + s).cos() * 5.0
                    + (x * 0.05 + s).sin() * (z * 0.05 + s).cos() * 10.0;
                (n + base).floor() as i32
            }
            GeneratorKind::Hilly => {
                let n = (x * 0.08 + s).sin() * (z * 0.08 + s).cos() * 8.0
                    + (x * 0.03 + s).sin() * (z * 0.03 + s).cos() * 18.0;
                (n + base).floor() as i32
            }
            GeneratorKind::Perlin => {
                let perlin = Perlin::new(seed);
                let n = perlin.get([x * 0.05, z * 0.05]) * 12.0;
                (n + base).floor() as i32
            }
        }
    }
}

/// The block a column holds at height `y` given its surface height `h`.
///
/// Stone in the deep body, a dirt cap, one grass layer at the surface, air
/// above. This is the baseline every save diff is computed against.
#[inline]
pub fn block_for_height(y: i32, h: i32) -> BlockType {
    if y < h - 5 {
        BlockType::STONE
    } else if y < h - 1 {
        BlockType::DIRT
    } else if y < h {
        BlockType::GRASS
    } else {
        BlockType::AIR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_are_deterministic() {
        for kind in [
            GeneratorKind::Classic,
            GeneratorKind::Hilly,
            GeneratorKind::Perlin,
        ] {
            for (x, z) in [(0, 0), (17, -3), (-100, 250)] {
                assert_eq!(
                    kind.height(x, z, 1234),
                    kind.height(x, z, 1234),
                    "{:?} must be pure at ({}, {})",
                    kind,
                    x,
                    z
                );
            }
        }
    }

    #[test]
    fn different_seeds_move_the_terrain() {
        let a: Vec<i32> = (0..64)
            .map(|x| GeneratorKind::Classic.height(x, 0, 1))
            .collect();
        let b: Vec<i32> = (0..64)
            .map(|x| GeneratorKind::Classic.height(x, 0, 2))
            .collect();
        assert_ne!(a, b);
    }

    #[test]
    fn heights_stay_inside_the_column() {
        for kind in [
            GeneratorKind::Classic,
            GeneratorKind::Hilly,
            GeneratorKind::Perlin,
        ] {
            for x in -50..50 {
                for z in -50..50 {
                    let h = kind.height(x, z, 42);
                    assert!(h > 0 && h < CHUNK_HEIGHT, "{:?} h={} out of range", kind, h);
                }
            }
        }
    }

    #[test]
    fn column_layers_follow_the_thresholds() {
        // A column with surface height 40: stone body, dirt cap, one grass
        // layer, then air.
        let h = 40;
        assert_eq!(block_for_height(30, h), BlockType::STONE);
        assert_eq!(block_for_height(34, h), BlockType::STONE);
        assert_eq!(block_for_height(35, h), BlockType::DIRT);
        assert_eq!(block_for_height(36, h), BlockType::DIRT);
        assert_eq!(block_for_height(38, h), BlockType::DIRT);
        assert_eq!(block_for_height(39, h), BlockType::GRASS);
        assert_eq!(block_for_height(40, h), BlockType::AIR);
        assert_eq!(block_for_height(63, h), BlockType::AIR);
    }

    #[test]
    fn names_round_trip() {
        for kind in [
            GeneratorKind::Classic,
            GeneratorKind::Hilly,
            GeneratorKind::Perlin,
        ] {
            assert_eq!(GeneratorKind::by_name(kind.name()), Some(kind));
        }
        assert_eq!(GeneratorKind::by_name("flatlands"), None);
    }
}

//! # World Module
//!
//! This module provides the `World` struct which manages the sparse collection
//! of loaded chunks. It is the central coordinator for chunk loading, global
//! block addressing, incremental mesh rebuilds, and distance-based unloading.
//!
//! ## Architecture
//!
//! Only chunks that have been requested are kept in memory, keyed by their
//! `(chunk_x, chunk_z)` column coordinates. Global block coordinates resolve
//! to exactly one chunk and one local coordinate via Euclidean division, or
//! degrade to air when the owning chunk is not loaded. That is expected
//! steady-state at the world's edges, not an error.
//!
//! ## Incremental rebuilds
//!
//! Block edits never rebuild geometry immediately. They mark the owning chunk
//! (and any boundary-adjacent neighbor) dirty, and `rebuild_dirty_chunks`
//! drains a bounded number of entries per tick. A bulk edit such as a
//! save-file replay touching thousands of blocks therefore costs a few
//! rebuilds per tick instead of one per edit, trading a few frames of stale
//! geometry for a bounded frame time.

use std::collections::{HashMap, HashSet};

use cgmath::Point2;

use crate::config::WorldConfig;
use crate::meshing::ChunkNeighbors;

use super::block::block_type::BlockType;
use super::chunk::{Chunk, CHUNK_SIZE};
use super::terrain::GeneratorKind;

/// A voxel world composed of dynamically loaded chunk columns.
///
/// All mutation happens on the single game-tick call path; there is no
/// background work, so no chunk is ever touched by two writers.
pub struct World {
    /// Loaded chunks, keyed by chunk coordinates.
    chunks: HashMap<Point2<i32>, Chunk>,
    /// The terrain seed; with `generator` it fully determines baseline
    /// terrain.
    seed: u32,
    /// Which height-field generator shapes this world.
    generator: GeneratorKind,
    /// Chunk keys whose meshes are stale. Set semantics: marking a chunk
    /// twice in a tick queues one rebuild.
    dirty: HashSet<Point2<i32>>,
    /// Runtime tunables.
    config: WorldConfig,
    /// Writes dropped because the owning chunk was not loaded; kept as a
    /// diagnostic counter.
    dropped_writes: u64,
}

impl World {
    /// Creates a world with the given seed and generator.
    pub fn new(seed: u32, generator: GeneratorKind, config: WorldConfig) -> Self {
        World {
            chunks: HashMap::new(),
            seed,
            generator,
            dirty: HashSet::new(),
            config,
            dropped_writes: 0,
        }
    }

    /// The terrain seed.
    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The generator shaping this world's baseline terrain.
    #[inline]
    pub fn generator(&self) -> GeneratorKind {
        self.generator
    }

    /// The world's runtime configuration.
    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Splits a global horizontal coordinate into chunk and local parts.
    ///
    /// Euclidean division keeps the local part in `0..CHUNK_SIZE` for
    /// negative coordinates too: world x = -1 is local 15 of chunk -1.
    #[inline]
    fn split_coord(world: i32) -> (i32, i32) {
        (world.div_euclid(CHUNK_SIZE), world.rem_euclid(CHUNK_SIZE))
    }

    /// Borrow the chunk at the given chunk coordinates, if loaded.
    pub fn get_chunk(&self, key: Point2<i32>) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    /// Mutably borrow the chunk at the given chunk coordinates, if loaded.
    pub fn get_chunk_mut(&mut self, key: Point2<i32>) -> Option<&mut Chunk> {
        self.chunks.get_mut(&key)
    }

    /// Iterates over all loaded chunks, for the renderer to walk.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Number of currently loaded chunks.
    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of chunks queued for a mesh rebuild.
    pub fn pending_rebuilds(&self) -> usize {
        self.dirty.len()
    }

    /// Writes dropped because their chunk was not loaded.
    pub fn dropped_writes(&self) -> u64 {
        self.dropped_writes
    }

    /// Creates, generates, and meshes the chunk at `(chunk_x, chunk_z)`.
    ///
    /// Idempotent: if the chunk already exists this does nothing, with no
    /// second generation pass and no second mesh build. Loaded horizontal neighbors are
    /// marked dirty so boundary faces they rendered against the void get
    /// re-culled now that this chunk occludes them.
    pub fn create_chunk(&mut self, chunk_x: i32, chunk_z: i32) {
        let key = Point2::new(chunk_x, chunk_z);
        if self.chunks.contains_key(&key) {
            return;
        }

        log::debug!("creating chunk ({}, {})", chunk_x, chunk_z);
        let chunk = Chunk::generate(key, self.generator, self.seed);
        self.chunks.insert(key, chunk);
        self.rebuild_chunk(key);

        for neighbor in Self::horizontal_neighbors(key) {
            if self.chunks.contains_key(&neighbor) {
                self.dirty.insert(neighbor);
            }
        }
    }

    /// Loads every chunk within the configured render distance of `center`.
    pub fn load_around(&mut self, center: Point2<i32>) {
        let radius = self.config.render_distance;
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                self.create_chunk(center.x + dx, center.y + dz);
            }
        }
    }

    /// The four horizontally adjacent chunk keys.
    fn horizontal_neighbors(key: Point2<i32>) -> [Point2<i32>; 4] {
        [
            Point2::new(key.x - 1, key.y),
            Point2::new(key.x + 1, key.y),
            Point2::new(key.x, key.y - 1),
            Point2::new(key.x, key.y + 1),
        ]
    }

    /// Reads the block at global coordinates.
    ///
    /// Resolves deterministically to one chunk and one local coordinate;
    /// reads into unloaded chunks (or outside the vertical range) are air.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        let (chunk_x, local_x) = Self::split_coord(x);
        let (chunk_z, local_z) = Self::split_coord(z);
        match self.chunks.get(&Point2::new(chunk_x, chunk_z)) {
            Some(chunk) => chunk.get(local_x, y, local_z),
            None => BlockType::AIR,
        }
    }

    /// Writes the block at global coordinates and queues the affected meshes.
    ///
    /// The owning chunk is marked dirty, and when the edit touches a chunk
    /// boundary the neighbor sharing that face is marked too, since its
    /// culling decisions depended on the old block. Writes into unloaded chunks are
    /// dropped (and counted), never faulted.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) {
        let (chunk_x, local_x) = Self::split_coord(x);
        let (chunk_z, local_z) = Self::split_coord(z);
        let key = Point2::new(chunk_x, chunk_z);

        let chunk = match self.chunks.get_mut(&key) {
            Some(chunk) => chunk,
            None => {
                self.dropped_writes += 1;
                log::debug!(
                    "dropped write of {:?} at ({}, {}, {}): chunk ({}, {}) not loaded",
                    block_type,
                    x,
                    y,
                    z,
                    chunk_x,
                    chunk_z
                );
                return;
            }
        };
        chunk.set(local_x, y, local_z, block_type);

        self.mark_chunk_dirty(key);
        if local_x == 0 {
            self.mark_chunk_dirty(Point2::new(chunk_x - 1, chunk_z));
        }
        if local_x == CHUNK_SIZE - 1 {
            self.mark_chunk_dirty(Point2::new(chunk_x + 1, chunk_z));
        }
        if local_z == 0 {
            self.mark_chunk_dirty(Point2::new(chunk_x, chunk_z - 1));
        }
        if local_z == CHUNK_SIZE - 1 {
            self.mark_chunk_dirty(Point2::new(chunk_x, chunk_z + 1));
        }
    }

    /// Queues a chunk for a mesh rebuild at the end of the tick.
    pub fn mark_chunk_dirty(&mut self, key: Point2<i32>) {
        self.dirty.insert(key);
    }

    /// Rebuilds a bounded number of dirty chunks and returns how many were
    /// actually rebuilt.
    ///
    /// Call once per tick. At most `rebuild_budget` entries are popped;
    /// anything beyond the budget stays queued for later ticks. Entries whose
    /// chunk has been unloaded in the meantime are discarded: an eviction
    /// cancels the pending rebuild rather than resurrecting the chunk.
    pub fn rebuild_dirty_chunks(&mut self) -> usize {
        if self.dirty.is_empty() {
            return 0;
        }

        let batch: Vec<Point2<i32>> = self
            .dirty
            .iter()
            .take(self.config.rebuild_budget)
            .copied()
            .collect();

        let mut rebuilt = 0;
        for key in batch {
            self.dirty.remove(&key);
            if self.rebuild_chunk(key) {
                rebuilt += 1;
            }
        }
        log::debug!(
            "rebuilt {} chunk meshes, {} still queued",
            rebuilt,
            self.dirty.len()
        );
        rebuilt
    }

    /// Rebuilds one chunk's meshes from its blocks and its loaded neighbors.
    ///
    /// Returns false if the chunk is not loaded. The new geometry is built
    /// from shared borrows first, then installed in one swap that releases
    /// the previous generation.
    fn rebuild_chunk(&mut self, key: Point2<i32>) -> bool {
        let meshes = {
            let chunk = match self.chunks.get(&key) {
                Some(chunk) => chunk,
                None => return false,
            };
            let neighbors = ChunkNeighbors {
                west: self.chunks.get(&Point2::new(key.x - 1, key.y)),
                east: self.chunks.get(&Point2::new(key.x + 1, key.y)),
                south: self.chunks.get(&Point2::new(key.x, key.y - 1)),
                north: self.chunks.get(&Point2::new(key.x, key.y + 1)),
            };
            chunk.build_mesh(&neighbors)
        };

        match self.chunks.get_mut(&key) {
            Some(chunk) => {
                chunk.install_meshes(meshes);
                true
            }
            None => false,
        }
    }

    /// Unloads every chunk farther than the configured maximum distance from
    /// the player's chunk, releasing its meshes.
    ///
    /// Returns the evicted keys so the rendering collaborator can drop any
    /// GPU-side resources it holds for them. Pending rebuilds for evicted
    /// chunks are cancelled.
    pub fn unload_distant_chunks(&mut self, player_chunk: Point2<i32>) -> Vec<Point2<i32>> {
        let max_distance = self.config.max_chunk_distance() as f64;

        let to_remove: Vec<Point2<i32>> = self
            .chunks
            .keys()
            .filter(|key| {
                let dx = (key.x - player_chunk.x) as f64;
                let dz = (key.y - player_chunk.y) as f64;
                (dx * dx + dz * dz).sqrt() > max_distance
            })
            .copied()
            .collect();

        for key in &to_remove {
            if let Some(mut chunk) = self.chunks.remove(key) {
                chunk.dispose_meshes();
            }
            self.dirty.remove(key);
        }

        if !to_remove.is_empty() {
            log::info!("unloaded {} distant chunks", to_remove.len());
        }
        to_remove
    }

    /// Applies a visibility predicate (typically frustum containment) to
    /// every loaded chunk and returns `(visible, hidden)` counts.
    pub fn update_chunk_visibility<F>(&mut self, mut is_visible: F) -> (usize, usize)
    where
        F: FnMut(&Chunk) -> bool,
    {
        let mut visible = 0;
        let mut hidden = 0;
        for chunk in self.chunks.values_mut() {
            let v = is_visible(chunk);
            chunk.set_visible(v);
            if v {
                visible += 1;
            } else {
                hidden += 1;
            }
        }
        (visible, hidden)
    }

    /// Discards all loaded chunks and re-targets the world at a new seed and
    /// generator. Used by save loading before replaying edits.
    pub fn reset(&mut self, seed: u32, generator: GeneratorKind) {
        self.chunks.clear();
        self.dirty.clear();
        self.seed = seed;
        self.generator = generator;
        self.dropped_writes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::chunk::CHUNK_HEIGHT;

    fn test_world() -> World {
        World::new(31337, GeneratorKind::Classic, WorldConfig::default())
    }

    #[test]
    fn create_chunk_is_idempotent() {
        let mut world = test_world();
        world.create_chunk(0, 0);
        world.set_block(3, 50, 3, BlockType::PLANKS);
        world.rebuild_dirty_chunks();

        // A second create must not regenerate terrain over the edit.
        world.create_chunk(0, 0);
        assert_eq!(world.loaded_chunk_count(), 1);
        assert_eq!(world.get_block(3, 50, 3), BlockType::PLANKS);
    }

    #[test]
    fn routing_matches_direct_chunk_access() {
        let mut world = test_world();
        for (cx, cz) in [(0, 0), (-1, 0), (0, -1), (-1, -1)] {
            world.create_chunk(cx, cz);
        }

        for (x, z) in [(0i32, 0i32), (15, 15), (-1, -1), (-16, 7), (5, -9)] {
            for y in [0, 20, CHUNK_HEIGHT - 1] {
                let key = Point2::new(x.div_euclid(CHUNK_SIZE), z.div_euclid(CHUNK_SIZE));
                let direct = world.get_chunk(key).unwrap().get(
                    x.rem_euclid(CHUNK_SIZE),
                    y,
                    z.rem_euclid(CHUNK_SIZE),
                );
                assert_eq!(world.get_block(x, y, z), direct, "at ({}, {}, {})", x, y, z);
            }
        }
    }

    #[test]
    fn unloaded_chunks_read_as_air_and_drop_writes() {
        let mut world = test_world();
        assert_eq!(world.get_block(1000, 10, 1000), BlockType::AIR);

        world.set_block(1000, 10, 1000, BlockType::STONE);
        assert_eq!(world.get_block(1000, 10, 1000), BlockType::AIR);
        assert_eq!(world.dropped_writes(), 1);
        assert_eq!(world.pending_rebuilds(), 0);
    }

    #[test]
    fn read_after_write_through_the_world() {
        let mut world = test_world();
        world.create_chunk(-1, -1);
        world.set_block(-5, 40, -12, BlockType::GLASS);
        assert_eq!(world.get_block(-5, 40, -12), BlockType::GLASS);
    }

    #[test]
    fn interior_edit_marks_only_its_own_chunk() {
        let mut world = test_world();
        world.create_chunk(0, 0);
        world.rebuild_dirty_chunks();
        assert_eq!(world.pending_rebuilds(), 0);

        world.set_block(7, 30, 7, BlockType::STONE);
        assert_eq!(world.pending_rebuilds(), 1);
    }

    #[test]
    fn boundary_edit_marks_the_facing_neighbor() {
        let mut world = test_world();
        world.create_chunk(0, 0);
        world.create_chunk(1, 0);
        while world.rebuild_dirty_chunks() > 0 {}

        // Local x = 15 touches the shared face with chunk (1, 0).
        world.set_block(15, 30, 7, BlockType::AIR);
        assert_eq!(world.pending_rebuilds(), 2);

        // A corner edit at local (0, 0) marks west and south too; the home
        // chunk is already queued, so only two entries are new.
        world.set_block(0, 30, 0, BlockType::AIR);
        assert_eq!(world.pending_rebuilds(), 4);
    }

    #[test]
    fn repeated_edits_queue_one_rebuild() {
        let mut world = test_world();
        world.create_chunk(0, 0);
        world.rebuild_dirty_chunks();

        for y in 10..30 {
            world.set_block(5, y, 5, BlockType::STONE);
        }
        assert_eq!(world.pending_rebuilds(), 1);
    }

    #[test]
    fn rebuilds_are_bounded_per_tick() {
        let config = WorldConfig {
            rebuild_budget: 4,
            ..WorldConfig::default()
        };
        let mut world = World::new(1, GeneratorKind::Classic, config);

        // Touch 9 distinct chunks in one tick (interior edits only).
        for i in 0..9 {
            world.create_chunk(i * 2, 0);
        }
        while world.rebuild_dirty_chunks() > 0 {}
        for i in 0..9 {
            world.set_block(i * 2 * CHUNK_SIZE + 7, 30, 7, BlockType::STONE);
        }
        assert_eq!(world.pending_rebuilds(), 9);

        // ceil(9 / 4) = 3 ticks drains the queue, each chunk rebuilt once.
        assert_eq!(world.rebuild_dirty_chunks(), 4);
        assert_eq!(world.rebuild_dirty_chunks(), 4);
        assert_eq!(world.rebuild_dirty_chunks(), 1);
        assert_eq!(world.rebuild_dirty_chunks(), 0);
        assert_eq!(world.pending_rebuilds(), 0);
    }

    #[test]
    fn eviction_removes_far_chunks_and_cancels_rebuilds() {
        let mut world = test_world();
        world.load_around(Point2::new(0, 0));
        let loaded = world.loaded_chunk_count();
        assert!(loaded > 0);

        // Mark something dirty, then walk far away.
        world.set_block(0, 30, 0, BlockType::STONE);
        let evicted = world.unload_distant_chunks(Point2::new(100, 100));
        assert_eq!(evicted.len(), loaded);
        assert_eq!(world.loaded_chunk_count(), 0);
        assert_eq!(world.pending_rebuilds(), 0, "evicted rebuilds are cancelled");
    }

    #[test]
    fn eviction_keeps_chunks_in_range() {
        let mut world = test_world();
        world.load_around(Point2::new(0, 0));
        let loaded = world.loaded_chunk_count();

        let evicted = world.unload_distant_chunks(Point2::new(0, 0));
        assert!(evicted.is_empty());
        assert_eq!(world.loaded_chunk_count(), loaded);
    }

    #[test]
    fn visibility_updates_flag_every_chunk() {
        let mut world = test_world();
        world.create_chunk(0, 0);
        world.create_chunk(1, 0);
        world.create_chunk(2, 0);

        let (visible, hidden) =
            world.update_chunk_visibility(|chunk| chunk.position().x < 2);
        assert_eq!((visible, hidden), (2, 1));
        assert!(!world.get_chunk(Point2::new(2, 0)).unwrap().is_visible());
    }

    #[test]
    fn cross_chunk_culling_through_the_scheduler() {
        let mut world = test_world();
        world.create_chunk(0, 0);
        while world.rebuild_dirty_chunks() > 0 {}

        // Flatten a 2-block pillar across the boundary at local x = 15 / 0.
        let y = 50;
        world.set_block(15, y, 8, BlockType::STONE);
        while world.rebuild_dirty_chunks() > 0 {}
        let alone = world
            .get_chunk(Point2::new(0, 0))
            .unwrap()
            .meshes()
            .unwrap()
            .quad_count();

        // Loading the east neighbor with its own stone at the boundary must
        // remove the shared face once the dirty queue drains.
        world.create_chunk(1, 0);
        world.set_block(16, y, 8, BlockType::STONE);
        while world.rebuild_dirty_chunks() > 0 {}
        let culled = world
            .get_chunk(Point2::new(0, 0))
            .unwrap()
            .meshes()
            .unwrap()
            .quad_count();
        assert!(
            culled < alone,
            "boundary face must be culled once the neighbor holds stone ({} -> {})",
            alone,
            culled
        );
    }
}

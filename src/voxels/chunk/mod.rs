//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed-size 16×64×16 column of
//! voxel data, the fundamental unit of world storage.
//!
//! ## Storage
//!
//! Blocks live in a flat array indexed `x + z·SIZE + y·SIZE²`; x and z vary
//! fastest, y slowest, so each horizontal slab of the column is contiguous in
//! memory and the meshing scan walks the array mostly linearly. Every access
//! is range-checked: out-of-range reads return air and out-of-range writes
//! are ignored, so callers never fault on edge coordinates.
//!
//! A chunk also owns its derived render meshes. They carry no independent
//! state: any block change inside or adjacent to the chunk invalidates them
//! wholesale, and they are replaced as a unit ("construct new, release old"),
//! never patched in place.

use cgmath::Point2;

use crate::meshing::ChunkMeshes;

use super::block::block_type::BlockType;
use super::block::Block;
use super::terrain::{block_for_height, GeneratorKind};

/// The horizontal dimension (width and depth) of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// The fixed vertical extent of every chunk column.
pub const CHUNK_HEIGHT: i32 = 64;
/// The number of blocks in one horizontal slab of a chunk.
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_SIZE * CHUNK_SIZE;
/// The total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_PLANE_SIZE * CHUNK_HEIGHT) as usize;

/// A 16×64×16 column of voxel blocks plus its derived render geometry.
///
/// Chunks are created by the world when a column is first requested, filled
/// synchronously by the terrain generator, and disposed when evicted by the
/// distance sweep.
pub struct Chunk {
    /// This chunk's position in chunk coordinates (not block coordinates);
    /// `x` along world X, `y` along world Z.
    position: Point2<i32>,
    /// The block array, indexed by [`Chunk::index`].
    blocks: Vec<Block>,
    /// Count of non-air cells; maintained by `set` so emptiness checks and
    /// the no-mesh-for-empty-chunk rule are O(1).
    non_air: u32,
    /// Current render geometry, if any has been built.
    meshes: Option<ChunkMeshes>,
    /// Renderer-facing visibility flag, driven by frustum culling.
    visible: bool,
}

impl Chunk {
    /// Creates a chunk filled entirely with air.
    pub fn empty(position: Point2<i32>) -> Self {
        Chunk {
            position,
            blocks: vec![Block::AIR; CHUNK_VOLUME],
            non_air: 0,
            meshes: None,
            visible: true,
        }
    }

    /// Creates a chunk and fills it from the terrain generator.
    ///
    /// Each column samples the height field once at its world coordinates and
    /// fills stone, dirt cap, grass surface, and air per the baseline layer
    /// rule. Deterministic for a given `(generator, seed)`.
    pub fn generate(position: Point2<i32>, generator: GeneratorKind, seed: u32) -> Self {
        let mut chunk = Chunk::empty(position);

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let world_x = position.x * CHUNK_SIZE + x;
                let world_z = position.y * CHUNK_SIZE + z;
                let height = generator.height(world_x, world_z, seed);

                for y in 0..CHUNK_HEIGHT {
                    let block = block_for_height(y, height);
                    if !block.is_air() {
                        chunk.blocks[Self::index(x, y, z)] = Block::new(block);
                        chunk.non_air += 1;
                    }
                }
            }
        }

        chunk
    }

    /// This chunk's position in chunk coordinates.
    #[inline]
    pub fn position(&self) -> Point2<i32> {
        self.position
    }

    /// Flat index of a local coordinate triple.
    #[inline]
    fn index(x: i32, y: i32, z: i32) -> usize {
        (x + z * CHUNK_SIZE + y * CHUNK_PLANE_SIZE) as usize
    }

    /// Whether a local coordinate triple lies inside the chunk.
    #[inline]
    fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x)
            && (0..CHUNK_HEIGHT).contains(&y)
            && (0..CHUNK_SIZE).contains(&z)
    }

    /// Reads the block at chunk-local coordinates.
    ///
    /// Any out-of-range coordinate reads as air. Cross-chunk sampling is the
    /// world's job; this accessor never wraps a horizontal overflow back into
    /// the local array.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockType {
        if !Self::in_bounds(x, y, z) {
            return BlockType::AIR;
        }
        self.blocks[Self::index(x, y, z)].block_type()
    }

    /// Writes the block at chunk-local coordinates.
    ///
    /// Out-of-range writes are ignored. The caller is responsible for marking
    /// the chunk (and boundary neighbors) dirty afterwards.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) {
        if !Self::in_bounds(x, y, z) {
            return;
        }
        let cell = &mut self.blocks[Self::index(x, y, z)];
        let was_air = cell.is_air();
        *cell = Block::new(block_type);
        match (was_air, block_type.is_air()) {
            (true, false) => self.non_air += 1,
            (false, true) => self.non_air -= 1,
            _ => {}
        }
    }

    /// Whether this chunk contains no blocks at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.non_air == 0
    }

    /// Builds this chunk's render geometry from its blocks and the loaded
    /// neighbors, without installing it.
    ///
    /// See [`crate::meshing::build_chunk_mesh`] for the algorithm. Splitting
    /// build from [`Chunk::install_meshes`] lets the world construct the new
    /// geometry from shared borrows before committing the swap.
    pub fn build_mesh(&self, neighbors: &crate::meshing::ChunkNeighbors) -> ChunkMeshes {
        crate::meshing::build_chunk_mesh(self, neighbors)
    }

    /// The chunk's current render geometry, if built.
    pub fn meshes(&self) -> Option<&ChunkMeshes> {
        self.meshes.as_ref()
    }

    /// Installs freshly built render geometry, releasing the previous one.
    ///
    /// The swap is a single assignment: there is never a moment where the
    /// chunk references both generations or neither.
    pub fn install_meshes(&mut self, meshes: ChunkMeshes) {
        self.meshes = Some(meshes);
    }

    /// Releases the chunk's render geometry, used on unload.
    pub fn dispose_meshes(&mut self) {
        self.meshes = None;
    }

    /// Whether the renderer should draw this chunk.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sets the renderer-facing visibility flag (driven by frustum culling).
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

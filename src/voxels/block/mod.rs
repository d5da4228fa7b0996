//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel
//! world: the compact storage cell, block type definitions, face geometry
//! tables, and the static block registry.

use block_type::BlockType;

pub mod block_face;
pub mod block_type;
pub mod registry;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage and serialization of block data.
pub type BlockTypeSize = u8;

/// Represents a single voxel cell in a chunk's block array.
///
/// This is a lightweight structure that stores only the block type id; all
/// other block properties are looked up from the registry.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute and the bytemuck derives keep the cell a plain
/// byte, so a chunk's block array can be treated as a contiguous byte buffer
/// for serialization or diffing.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize`.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// An air cell; the default content of a freshly allocated chunk.
    pub const AIR: Block = Block { block_type: 0 };

    /// Creates a new cell of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type.id(),
        }
    }

    /// Decodes the cell back into a `BlockType`.
    ///
    /// Unknown ids decode as air, matching the registry's degrade-don't-fail
    /// policy.
    #[inline]
    pub fn block_type(self) -> BlockType {
        BlockType::from_id(self.block_type)
    }

    /// Whether this cell is empty space.
    #[inline]
    pub fn is_air(self) -> bool {
        self.block_type == 0
    }
}

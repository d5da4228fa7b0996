//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification, conversion from the
//! compact storage representation, and the two classification axes used by the
//! mesh builder (occlusion and draw batching).

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// Each variant represents a distinct type of block. The discriminants are part
/// of the save format and must never be renumbered. The `FromPrimitive` derive
/// allows conversion from integers, which is used when decoding stored block
/// arrays and save-file diffs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An air block: absence of geometry. Always id 0.
    AIR = 0,

    /// A grass block with different textures on top, sides, and bottom.
    GRASS = 1,

    /// A basic dirt block.
    DIRT = 2,

    /// A stone block.
    STONE = 3,

    /// An oak log with ring textures on top and bottom.
    WOOD = 4,

    /// An oak leaves block; translucent.
    LEAVES = 5,

    /// Oak planks.
    PLANKS = 6,

    /// A glass block; translucent, and the only block whose faces are
    /// suppressed against a neighbor of the same type.
    GLASS = 7,
}

/// How a block occludes its neighbors' faces.
///
/// This is the culling classification: a face is hidden only when the block in
/// front of it is `Opaque`. It is deliberately distinct from [`RenderPass`]:
/// air is transparent for culling purposes but belongs to no draw batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Opacity {
    /// Fully hides any face behind it.
    Opaque,
    /// Lets faces behind it show through (glass, leaves).
    Translucent,
    /// Not a block at all.
    Air,
}

impl Opacity {
    /// Whether a neighbor of this opacity hides the face in front of it.
    #[inline]
    pub fn occludes(self) -> bool {
        matches!(self, Opacity::Opaque)
    }
}

/// Which draw batch a block's geometry belongs to.
///
/// Chunk meshes are partitioned into one opaque and one translucent geometry
/// so the renderer can draw them with the appropriate blending state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderPass {
    /// Solid geometry, drawn first.
    Opaque,
    /// Alpha-blended geometry (glass, leaves), drawn after opaque.
    Translucent,
}

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// Unknown values decode as [`BlockType::AIR`] rather than failing: stale
    /// save files or corrupted block arrays degrade to empty space instead of
    /// crashing the caller.
    pub fn from_id(id: BlockTypeSize) -> Self {
        num::FromPrimitive::from_u8(id).unwrap_or(BlockType::AIR)
    }

    /// The compact storage representation of this block type.
    #[inline]
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether this block is air.
    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockType::AIR
    }

    /// The occlusion class of this block type.
    #[inline]
    pub fn opacity(self) -> Opacity {
        match self {
            BlockType::AIR => Opacity::Air,
            BlockType::GLASS | BlockType::LEAVES => Opacity::Translucent,
            _ => Opacity::Opaque,
        }
    }

    /// The draw batch this block's faces belong to, or `None` for air.
    #[inline]
    pub fn render_pass(self) -> Option<RenderPass> {
        match self.opacity() {
            Opacity::Air => None,
            Opacity::Translucent => Some(RenderPass::Translucent),
            Opacity::Opaque => Some(RenderPass::Opaque),
        }
    }

    /// Whether a face between two blocks of this type is suppressed.
    ///
    /// Only glass panes merge visually this way; leaves keep their shared
    /// faces so foliage reads as dense from every angle.
    #[inline]
    pub fn culls_same_type(self) -> bool {
        self == BlockType::GLASS
    }

    /// All placeable block types, in hotbar order.
    pub fn placeable() -> [BlockType; 7] {
        [
            BlockType::GRASS,
            BlockType::DIRT,
            BlockType::STONE,
            BlockType::WOOD,
            BlockType::LEAVES,
            BlockType::PLANKS,
            BlockType::GLASS,
        ]
    }
}

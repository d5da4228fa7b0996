//! # Block Face Module
//!
//! This module defines the six faces of a voxel block together with the static
//! geometry tables the mesh builder reads: neighbor offsets for occlusion
//! queries, quad corner offsets in a fixed winding, and the UV orientation of
//! each face. Everything here is a compile-time lookup; the hot meshing loop
//! never computes face geometry at runtime.

/// Represents the six faces of a voxel block.
///
/// North/South run along +Z/-Z and East/West along +X/-X. The discriminants
/// index the static geometry tables below.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockFace {
    /// The upward face (+Y).
    Top = 0,
    /// The downward face (-Y).
    Bottom = 1,
    /// The face toward +Z.
    North = 2,
    /// The face toward -Z.
    South = 3,
    /// The face toward +X.
    East = 4,
    /// The face toward -X.
    West = 5,
}

/// Which of a block's three texture entries a face samples from.
///
/// The registry stores one texture per slot, not per face: all four lateral
/// faces share the `Side` entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextureSlot {
    /// Texture used by the top face.
    Top,
    /// Texture used by the bottom face.
    Bottom,
    /// Texture shared by the four lateral faces.
    Side,
}

/// Static geometry for one block face.
///
/// `corners` lists the four quad corners as offsets from the block's minimum
/// corner, ordered so that the fixed index winding `(0,2,1) (0,3,2)` produces
/// an outward-facing quad. `rotate_uv` selects between the identity UV layout
/// and the -90° rotated one; which faces rotate is a fixed property of the
/// face, not a runtime decision.
pub struct FaceGeometry {
    /// Offset to the neighboring voxel that can occlude this face.
    pub neighbor: [i32; 3],
    /// Quad corner offsets from the block origin, in emission order.
    pub corners: [[f32; 3]; 4],
    /// Whether this face uses the rotated UV orientation.
    pub rotate_uv: bool,
    /// Which registry texture entry this face samples.
    pub slot: TextureSlot,
}

/// Geometry table indexed by `BlockFace as usize`.
pub static FACE_GEOMETRY: [FaceGeometry; 6] = [
    // Top
    FaceGeometry {
        neighbor: [0, 1, 0],
        corners: [
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ],
        rotate_uv: false,
        slot: TextureSlot::Top,
    },
    // Bottom
    FaceGeometry {
        neighbor: [0, -1, 0],
        corners: [
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
        ],
        rotate_uv: false,
        slot: TextureSlot::Bottom,
    },
    // North (+Z)
    FaceGeometry {
        neighbor: [0, 0, 1],
        corners: [
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 0.0, 1.0],
        ],
        rotate_uv: true,
        slot: TextureSlot::Side,
    },
    // South (-Z)
    FaceGeometry {
        neighbor: [0, 0, -1],
        corners: [
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
        ],
        rotate_uv: true,
        slot: TextureSlot::Side,
    },
    // East (+X)
    FaceGeometry {
        neighbor: [1, 0, 0],
        corners: [
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 0.0],
        ],
        rotate_uv: false,
        slot: TextureSlot::Side,
    },
    // West (-X)
    FaceGeometry {
        neighbor: [-1, 0, 0],
        corners: [
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
        ],
        rotate_uv: false,
        slot: TextureSlot::Side,
    },
];

impl BlockFace {
    /// Returns all six faces in table order.
    pub fn all() -> [BlockFace; 6] {
        [
            BlockFace::Top,
            BlockFace::Bottom,
            BlockFace::North,
            BlockFace::South,
            BlockFace::East,
            BlockFace::West,
        ]
    }

    /// The static geometry record for this face.
    #[inline]
    pub fn geometry(self) -> &'static FaceGeometry {
        &FACE_GEOMETRY[self as usize]
    }

    /// Offset to the voxel whose opacity decides this face's visibility.
    #[inline]
    pub fn neighbor_offset(self) -> [i32; 3] {
        self.geometry().neighbor
    }

    /// Which registry texture entry this face samples.
    #[inline]
    pub fn texture_slot(self) -> TextureSlot {
        self.geometry().slot
    }
}

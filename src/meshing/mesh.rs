//! Mesh data structures for voxel rendering.
//!
//! A chunk's renderable geometry is at most two meshes, one opaque and one
//! translucent, each a flat vertex/index buffer plus a list of material
//! groups batching index ranges by texture. The renderer draws one mesh with
//! one draw call per group instead of one mesh per texture.

use crate::voxels::block::registry::TextureHandle;
use crate::voxels::chunk::CHUNK_HEIGHT;

/// A vertex in the chunk mesh.
///
/// Positions are world-space (chunk origin plus local offset), so meshes need
/// no per-chunk transform. The brightness channel carries the provisional
/// height-based light gradient.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Texture coordinates: [f32; 2] (8 bytes)
/// - Brightness: f32 (4 bytes)
///
/// Total size: 24 bytes, `#[repr(C)]` for direct upload to vertex buffers.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space.
    pub position: [f32; 3],
    /// UV texture coordinates (normalized 0.0-1.0).
    pub tex_coords: [f32; 2],
    /// Height-gradient brightness in [0.5, 1.0].
    pub brightness: f32,
}

/// A contiguous index range drawn with a single material.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaterialGroup {
    /// First index of the range.
    pub start: u32,
    /// Number of indices in the range (always a multiple of 6).
    pub count: u32,
    /// Index into the mesh's material list.
    pub material_index: u32,
}

/// One renderable geometry buffer with its material batching.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Vertex buffer.
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
    /// Deduplicated textures this mesh samples; `MaterialGroup::material_index`
    /// points into this list.
    pub materials: Vec<TextureHandle>,
    /// Index ranges per material, in emission order.
    pub groups: Vec<MaterialGroup>,
}

impl MeshData {
    /// Number of quads in this mesh.
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }
}

/// The derived render geometry of a chunk.
///
/// Both buffers are fully regenerable from the chunk's block array; they are
/// replaced wholesale on rebuild, never patched.
#[derive(Clone, Debug, Default)]
pub struct ChunkMeshes {
    /// Solid geometry, or `None` if no opaque face was emitted.
    pub opaque: Option<MeshData>,
    /// Alpha-blended geometry, or `None` if no translucent face was emitted.
    pub translucent: Option<MeshData>,
}

impl ChunkMeshes {
    /// Whether neither pass produced geometry.
    pub fn is_empty(&self) -> bool {
        self.opaque.is_none() && self.translucent.is_none()
    }

    /// Total quad count across both passes.
    pub fn quad_count(&self) -> usize {
        self.opaque.as_ref().map_or(0, MeshData::quad_count)
            + self.translucent.as_ref().map_or(0, MeshData::quad_count)
    }
}

/// Provisional lighting: a linear gradient from 0.5 at the world floor to 1.0
/// at the top of the column. Stands in until a real light solver exists.
#[inline]
pub fn height_brightness(y: f32) -> f32 {
    0.5 + (y / CHUNK_HEIGHT as f32) * 0.5
}

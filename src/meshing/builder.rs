//! Face-culling mesh construction for chunks.
//!
//! The builder visits every non-air voxel in a chunk and emits one quad per
//! face that is not hidden by its neighbor. Neighbors inside the chunk are
//! read directly; neighbors across a chunk boundary are read from the
//! [`ChunkNeighbors`] view, and an unloaded neighbor counts as air: the
//! boundary face is rendered rather than leaving a hole at the world edge,
//! accepting transient over-rendering until the neighbor loads.
//!
//! Geometry is partitioned into an opaque and a translucent accumulator, and
//! within each accumulator indices are batched into per-texture material
//! groups: consecutive quads with the same texture extend the previous group,
//! a texture change starts a new one. A chunk with no visible faces in a pass
//! produces no mesh for that pass at all.

use crate::voxels::block::block_face::{BlockFace, FaceGeometry};
use crate::voxels::block::block_type::{BlockType, RenderPass};
use crate::voxels::block::registry::{self, TextureHandle};
use crate::voxels::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};

use super::mesh::{height_brightness, ChunkMeshes, MaterialGroup, MeshData, Vertex};

/// UV layout for top and bottom faces.
const IDENTITY_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// UV layout rotated -90°, used by the faces whose corner order starts at the
/// lower-left of the texture.
const ROTATED_UVS: [[f32; 2]; 4] = [[1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]];

/// Borrowed view of the four horizontally adjacent chunks.
///
/// `None` entries are unloaded neighbors; the builder treats their blocks as
/// air. East/West run along +X/-X and North/South along +Z/-Z.
#[derive(Default)]
pub struct ChunkNeighbors<'a> {
    /// Neighbor at chunk x - 1.
    pub west: Option<&'a Chunk>,
    /// Neighbor at chunk x + 1.
    pub east: Option<&'a Chunk>,
    /// Neighbor at chunk z - 1.
    pub south: Option<&'a Chunk>,
    /// Neighbor at chunk z + 1.
    pub north: Option<&'a Chunk>,
}

impl<'a> ChunkNeighbors<'a> {
    /// A view with no loaded neighbors; every boundary face renders.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Accumulates quads for one render pass.
struct GeometryBuilder {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    materials: Vec<TextureHandle>,
    groups: Vec<MaterialGroup>,
}

impl GeometryBuilder {
    fn new() -> Self {
        GeometryBuilder {
            vertices: Vec::new(),
            indices: Vec::new(),
            materials: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Emits one face quad: four vertices, six indices in the fixed outward
    /// winding, and the material-group bookkeeping for its texture.
    fn add_quad(&mut self, texture: TextureHandle, base: [f32; 3], geometry: &FaceGeometry) {
        let start = self.vertices.len() as u32;
        let uvs = if geometry.rotate_uv {
            &ROTATED_UVS
        } else {
            &IDENTITY_UVS
        };

        for (corner, uv) in geometry.corners.iter().zip(uvs.iter()) {
            let position = [
                base[0] + corner[0],
                base[1] + corner[1],
                base[2] + corner[2],
            ];
            self.vertices.push(Vertex {
                position,
                tex_coords: *uv,
                brightness: height_brightness(position[1]),
            });
        }

        self.indices.extend_from_slice(&[
            start,
            start + 2,
            start + 1,
            start,
            start + 3,
            start + 2,
        ]);

        let material_index = match self.materials.iter().position(|t| *t == texture) {
            Some(i) => i as u32,
            None => {
                self.materials.push(texture);
                (self.materials.len() - 1) as u32
            }
        };

        // Run-length grouping: extend the previous group when the texture is
        // unchanged, otherwise open a new index range.
        match self.groups.last_mut() {
            Some(group) if group.material_index == material_index => group.count += 6,
            _ => self.groups.push(MaterialGroup {
                start: self.indices.len() as u32 - 6,
                count: 6,
                material_index,
            }),
        }
    }

    /// Finishes the pass; an accumulator that saw no quads yields no mesh.
    fn finish(self) -> Option<MeshData> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(MeshData {
            vertices: self.vertices,
            indices: self.indices,
            materials: self.materials,
            groups: self.groups,
        })
    }
}

/// Whether the face between `block` and `neighbor` should be rendered, seen
/// from `block`'s side.
///
/// A face survives unless its neighbor occludes it. Two glass blocks are the
/// special case: the shared face is suppressed on both sides to avoid
/// double-translucent overdraw, while leaves intentionally keep theirs.
#[inline]
fn face_visible(block: BlockType, neighbor: BlockType) -> bool {
    if neighbor == block && block.culls_same_type() {
        return false;
    }
    !neighbor.opacity().occludes()
}

/// Reads the block at chunk-local coordinates that may step one cell across a
/// horizontal boundary, routing to the owning neighbor chunk.
///
/// Above and below the column there is no block by definition, so vertical
/// overflow reads as air without a neighbor query; the bottom face at y = 0
/// and the top face at the column ceiling therefore always render.
fn sample_neighbor(
    chunk: &Chunk,
    neighbors: &ChunkNeighbors,
    x: i32,
    y: i32,
    z: i32,
) -> BlockType {
    if y < 0 || y >= CHUNK_HEIGHT {
        return BlockType::AIR;
    }
    if (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_SIZE).contains(&z) {
        return chunk.get(x, y, z);
    }
    if x < 0 {
        return neighbors
            .west
            .map_or(BlockType::AIR, |c| c.get(CHUNK_SIZE - 1, y, z));
    }
    if x >= CHUNK_SIZE {
        return neighbors.east.map_or(BlockType::AIR, |c| c.get(0, y, z));
    }
    if z < 0 {
        return neighbors
            .south
            .map_or(BlockType::AIR, |c| c.get(x, y, CHUNK_SIZE - 1));
    }
    neighbors.north.map_or(BlockType::AIR, |c| c.get(x, y, 0))
}

/// Builds the renderable geometry for a chunk.
///
/// Pure with respect to the chunk: the result is derived entirely from the
/// block arrays of the chunk and its loaded neighbors. The caller installs the
/// result, replacing any previous meshes.
pub fn build_chunk_mesh(chunk: &Chunk, neighbors: &ChunkNeighbors) -> ChunkMeshes {
    if chunk.is_empty() {
        return ChunkMeshes::default();
    }

    let mut opaque = GeometryBuilder::new();
    let mut translucent = GeometryBuilder::new();

    let origin_x = chunk.position().x * CHUNK_SIZE;
    let origin_z = chunk.position().y * CHUNK_SIZE;

    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let block = chunk.get(x, y, z);
                let pass = match block.render_pass() {
                    Some(pass) => pass,
                    None => continue,
                };

                let base = [
                    (origin_x + x) as f32,
                    y as f32,
                    (origin_z + z) as f32,
                ];

                for face in BlockFace::all() {
                    let [dx, dy, dz] = face.neighbor_offset();
                    let neighbor = sample_neighbor(chunk, neighbors, x + dx, y + dy, z + dz);
                    if !face_visible(block, neighbor) {
                        continue;
                    }

                    let texture = registry::texture_for_face(block.id(), face);
                    let builder = match pass {
                        RenderPass::Opaque => &mut opaque,
                        RenderPass::Translucent => &mut translucent,
                    };
                    builder.add_quad(texture, base, face.geometry());
                }
            }
        }
    }

    ChunkMeshes {
        opaque: opaque.finish(),
        translucent: translucent.finish(),
    }
}

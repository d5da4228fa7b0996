//! # Meshing Module
//!
//! Converts chunk block data into renderable surface geometry. `mesh` holds
//! the buffer types handed to the renderer; `builder` holds the face-culling
//! algorithm that fills them.

pub mod builder;
pub mod mesh;

pub use builder::{build_chunk_mesh, ChunkNeighbors};
pub use mesh::{height_brightness, ChunkMeshes, MaterialGroup, MeshData, Vertex};

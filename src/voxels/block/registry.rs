//! # Block Registry Module
//!
//! The registry is the single source of truth for block properties: display
//! name, per-face textures, occlusion class, and footstep sound material. It
//! is a static table fixed at compile time; adding a block means adding one
//! entry here and one `BlockType` variant.
//!
//! Texture references are small integer handles into [`TEXTURE_NAMES`], so the
//! meshing loop indexes arrays instead of hashing strings. The original asset
//! names are preserved in the table for the texture-loading collaborator.

use phf::phf_map;

use super::block_face::{BlockFace, TextureSlot};
use super::block_type::Opacity;
use super::BlockTypeSize;

/// A handle naming one entry in the texture table.
///
/// Handles are stable indices into [`TEXTURE_NAMES`]; the renderer resolves
/// them to loaded textures once and reuses the mapping for every chunk mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u16);

/// Asset names for every texture the block set references, indexed by
/// [`TextureHandle`].
pub static TEXTURE_NAMES: [&str; 9] = [
    "stone",
    "dirt",
    "grass_top_biome_plains",
    "grass_side_biome_plains",
    "log_oak",
    "log_oak_top",
    "leaves_oak_biome_plains",
    "planks_oak",
    "glass",
];

const TEX_STONE: TextureHandle = TextureHandle(0);
const TEX_DIRT: TextureHandle = TextureHandle(1);
const TEX_GRASS_TOP: TextureHandle = TextureHandle(2);
const TEX_GRASS_SIDE: TextureHandle = TextureHandle(3);
const TEX_LOG_OAK: TextureHandle = TextureHandle(4);
const TEX_LOG_OAK_TOP: TextureHandle = TextureHandle(5);
const TEX_LEAVES_OAK: TextureHandle = TextureHandle(6);
const TEX_PLANKS_OAK: TextureHandle = TextureHandle(7);
const TEX_GLASS: TextureHandle = TextureHandle(8);

/// Maps a texture asset name back to its handle.
///
/// Used by asset loading and save tooling; never by the meshing loop.
pub static TEXTURE_HANDLES: phf::Map<&'static str, u16> = phf_map! {
    "stone" => 0,
    "dirt" => 1,
    "grass_top_biome_plains" => 2,
    "grass_side_biome_plains" => 3,
    "log_oak" => 4,
    "log_oak_top" => 5,
    "leaves_oak_biome_plains" => 6,
    "planks_oak" => 7,
    "glass" => 8,
};

/// The material a block sounds like when stepped on or placed.
///
/// Consumed by the audio collaborator; air and unknown blocks have none.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SoundMaterial {
    /// Soft rustle.
    Grass,
    /// Dull thud.
    Dirt,
    /// Hard tap.
    Stone,
    /// Hollow knock.
    Wood,
    /// Leafy swish.
    Leaves,
}

/// Per-face texture handles for one block.
#[derive(Copy, Clone, Debug)]
pub struct FaceTextures {
    /// Texture for the top face.
    pub top: TextureHandle,
    /// Texture for the four lateral faces.
    pub side: TextureHandle,
    /// Texture for the bottom face.
    pub bottom: TextureHandle,
}

/// One registry entry: everything the engine knows about a block type.
#[derive(Clone, Debug)]
pub struct BlockInfo {
    /// The block's numeric id (matches `BlockType` discriminants).
    pub id: BlockTypeSize,
    /// Display name shown by inventory and debug UIs.
    pub name: &'static str,
    /// Per-face textures; `None` for air.
    pub textures: Option<FaceTextures>,
    /// The occlusion class used for face culling.
    pub opacity: Opacity,
    /// Footstep sound material; `None` for air.
    pub sound: Option<SoundMaterial>,
}

/// The block table, indexed by block id.
static BLOCK_REGISTRY: [BlockInfo; 8] = [
    BlockInfo {
        id: 0,
        name: "AIR",
        textures: None,
        opacity: Opacity::Air,
        sound: None,
    },
    BlockInfo {
        id: 1,
        name: "GRASS",
        textures: Some(FaceTextures {
            top: TEX_GRASS_TOP,
            side: TEX_GRASS_SIDE,
            bottom: TEX_DIRT,
        }),
        opacity: Opacity::Opaque,
        sound: Some(SoundMaterial::Grass),
    },
    BlockInfo {
        id: 2,
        name: "DIRT",
        textures: Some(FaceTextures {
            top: TEX_DIRT,
            side: TEX_DIRT,
            bottom: TEX_DIRT,
        }),
        opacity: Opacity::Opaque,
        sound: Some(SoundMaterial::Dirt),
    },
    BlockInfo {
        id: 3,
        name: "STONE",
        textures: Some(FaceTextures {
            top: TEX_STONE,
            side: TEX_STONE,
            bottom: TEX_STONE,
        }),
        opacity: Opacity::Opaque,
        sound: Some(SoundMaterial::Stone),
    },
    BlockInfo {
        id: 4,
        name: "WOOD",
        textures: Some(FaceTextures {
            top: TEX_LOG_OAK_TOP,
            side: TEX_LOG_OAK,
            bottom: TEX_LOG_OAK_TOP,
        }),
        opacity: Opacity::Opaque,
        sound: Some(SoundMaterial::Wood),
    },
    BlockInfo {
        id: 5,
        name: "LEAVES",
        textures: Some(FaceTextures {
            top: TEX_LEAVES_OAK,
            side: TEX_LEAVES_OAK,
            bottom: TEX_LEAVES_OAK,
        }),
        opacity: Opacity::Translucent,
        sound: Some(SoundMaterial::Leaves),
    },
    BlockInfo {
        id: 6,
        name: "PLANKS",
        textures: Some(FaceTextures {
            top: TEX_PLANKS_OAK,
            side: TEX_PLANKS_OAK,
            bottom: TEX_PLANKS_OAK,
        }),
        opacity: Opacity::Opaque,
        sound: Some(SoundMaterial::Wood),
    },
    BlockInfo {
        id: 7,
        name: "GLASS",
        textures: Some(FaceTextures {
            top: TEX_GLASS,
            side: TEX_GLASS,
            bottom: TEX_GLASS,
        }),
        opacity: Opacity::Translucent,
        sound: Some(SoundMaterial::Stone),
    },
];

/// Fallback entry returned for ids outside the table. Behaves like dirt so
/// unknown blocks render as *something* instead of crashing the mesher.
static UNKNOWN_BLOCK: BlockInfo = BlockInfo {
    id: BlockTypeSize::MAX,
    name: "UNKNOWN",
    textures: Some(FaceTextures {
        top: TEX_DIRT,
        side: TEX_DIRT,
        bottom: TEX_DIRT,
    }),
    opacity: Opacity::Opaque,
    sound: None,
};

/// Looks up the registry entry for a block id.
///
/// Never fails: ids outside the table resolve to a defined fallback entry.
pub fn lookup(id: BlockTypeSize) -> &'static BlockInfo {
    BLOCK_REGISTRY
        .get(id as usize)
        .unwrap_or(&UNKNOWN_BLOCK)
}

/// Resolves the texture a given face of a block samples.
///
/// Air has no textures; for any textured block the face's slot picks one of
/// the three registry entries. Unknown ids get the fallback dirt texture.
pub fn texture_for_face(id: BlockTypeSize, face: BlockFace) -> TextureHandle {
    let textures = match lookup(id).textures {
        Some(t) => t,
        None => return TEX_DIRT,
    };
    match face.texture_slot() {
        TextureSlot::Top => textures.top,
        TextureSlot::Bottom => textures.bottom,
        TextureSlot::Side => textures.side,
    }
}

/// The footstep sound material for a block id, if it has one.
pub fn footstep_material(id: BlockTypeSize) -> Option<SoundMaterial> {
    lookup(id).sound
}

/// Resolves a texture asset name to its handle, if the name is known.
pub fn texture_handle(name: &str) -> Option<TextureHandle> {
    TEXTURE_HANDLES.get(name).map(|&i| TextureHandle(i))
}

/// The asset name for a texture handle.
pub fn texture_name(handle: TextureHandle) -> &'static str {
    TEXTURE_NAMES
        .get(handle.0 as usize)
        .copied()
        .unwrap_or("dirt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::block_type::BlockType;

    #[test]
    fn registry_ids_match_positions() {
        for (i, info) in BLOCK_REGISTRY.iter().enumerate() {
            assert_eq!(info.id as usize, i);
        }
    }

    #[test]
    fn air_has_no_geometry_inputs() {
        let air = lookup(BlockType::AIR.id());
        assert!(air.textures.is_none());
        assert!(air.sound.is_none());
        assert_eq!(air.opacity, Opacity::Air);
    }

    #[test]
    fn grass_uses_distinct_face_textures() {
        let id = BlockType::GRASS.id();
        assert_eq!(texture_for_face(id, BlockFace::Top), TEX_GRASS_TOP);
        assert_eq!(texture_for_face(id, BlockFace::Bottom), TEX_DIRT);
        assert_eq!(texture_for_face(id, BlockFace::North), TEX_GRASS_SIDE);
        assert_eq!(texture_for_face(id, BlockFace::West), TEX_GRASS_SIDE);
    }

    #[test]
    fn unknown_ids_fall_back_instead_of_failing() {
        let info = lookup(250);
        assert_eq!(info.name, "UNKNOWN");
        assert_eq!(texture_for_face(250, BlockFace::Top), TEX_DIRT);
        assert_eq!(footstep_material(250), None);
    }

    #[test]
    fn texture_names_round_trip_through_handles() {
        for (i, name) in TEXTURE_NAMES.iter().enumerate() {
            let handle = texture_handle(name).expect("name must be mapped");
            assert_eq!(handle.0 as usize, i);
            assert_eq!(texture_name(handle), *name);
        }
        assert_eq!(texture_handle("missing_texture"), None);
    }

    #[test]
    fn registry_opacity_agrees_with_block_type() {
        for ty in BlockType::placeable() {
            assert_eq!(lookup(ty.id()).opacity, ty.opacity());
        }
    }
}

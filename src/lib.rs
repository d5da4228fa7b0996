#![warn(missing_docs)]

//! # Voxel Sandbox
//!
//! The world core of a block-building sandbox: chunked voxel storage,
//! procedural terrain, face-culled mesh generation, and sparse-diff world
//! saves.
//!
//! ## Key Modules
//!
//! * `voxels` - Block definitions, chunk storage, terrain generation, and the
//!   world coordinator with its incremental remesh scheduler
//! * `meshing` - Conversion of chunk data into renderable vertex/index
//!   buffers with per-texture material batching
//! * `save` - Sparse-diff persistence against regenerated baseline terrain
//! * `inventory` - The player's hotbar/backpack value type
//! * `config` - Runtime tuning knobs
//!
//! ## Architecture
//!
//! The crate is the algorithmic core of a larger game; rendering, input,
//! physics, and audio are collaborators that consume its interfaces:
//! * `World::get_block`/`set_block` for raycasting and editing
//! * Per-chunk mesh buffers plus a visibility flag for the renderer
//! * The block registry for GUI, audio, and texture loading
//!
//! Everything runs on the single game-tick call path. Edits are cheap: they
//! mutate a byte and mark chunks dirty, and `World::rebuild_dirty_chunks`
//! re-meshes a bounded number of chunks per tick so bulk edits never spike a
//! frame.

use cgmath::Point2;
use log::info;

pub mod config;
pub mod inventory;
pub mod meshing;
pub mod save;
pub mod voxels;

pub use config::WorldConfig;
pub use inventory::{Inventory, ItemStack};
pub use meshing::{build_chunk_mesh, ChunkMeshes, ChunkNeighbors, MaterialGroup, MeshData, Vertex};
pub use save::{load_world, save_world, PlayerSnapshot, SaveError, WorldSave};
pub use voxels::block::block_type::{BlockType, Opacity, RenderPass};
pub use voxels::block::registry;
pub use voxels::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
pub use voxels::terrain::GeneratorKind;
pub use voxels::world::World;

/// Runs a short headless demonstration of the world core.
///
/// Generates terrain around the origin, places a few blocks from the default
/// hotbar, drains the rebuild queue, and reports mesh statistics and the save
/// size. Useful as a smoke test and as example wiring for the collaborators.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let seed = save::fresh_seed();
    let mut world = World::new(seed, GeneratorKind::Classic, WorldConfig::default());
    world.load_around(Point2::new(0, 0));
    info!(
        "generated {} chunks around the origin (seed {})",
        world.loaded_chunk_count(),
        seed
    );

    // Place a short glass wall from the hotbar, the way the input layer would.
    let mut inventory = Inventory::with_default_blocks();
    inventory.select_slot(6);
    if let Some(block) = inventory.selected_block() {
        for x in 0..4 {
            world.set_block(x, 45, 0, block);
        }
    }

    let mut ticks = 0;
    while world.rebuild_dirty_chunks() > 0 {
        ticks += 1;
    }
    info!("drained the rebuild queue in {} ticks", ticks);

    let total_quads: usize = world
        .chunks()
        .filter_map(Chunk::meshes)
        .map(ChunkMeshes::quad_count)
        .sum();
    info!("world holds {} quads of surface geometry", total_quads);

    match save::to_json(&world, None) {
        Ok(json) => info!("save file would be {} bytes", json.len()),
        Err(err) => log::error!("failed to serialize the world: {}", err),
    }
}

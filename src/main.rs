//! # Voxel Sandbox Entry Point
//!
//! Runs the headless world-core demonstration; see `run()` in the library.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    voxel_sandbox::run();
}

//! Chunked voxel store: blocks, chunks, the owning world map and update writes.

mod block;
mod chunk;
mod error;
mod update;
mod world;

pub use block::*;
pub use chunk::*;
pub use error::WorldError;
pub use update::ChunkUpdate;
pub use world::*;

pub use mineflayer_core::Vector3i;

#![warn(missing_docs)]
//! Chunk surface extraction + the hand-off to whoever draws the meshes.
//!
//! [`MeshBuilder`] turns one chunk of a [`mineflayer_world::VoxelWorld`] into a
//! triangle list containing only the faces that border air, reading across
//! chunk edges through the world. Rebuilt meshes are pushed to a
//! [`MeshSink`], which owns displayed geometry per chunk.

mod mesh;
mod metrics;
mod sink;

pub use mesh::{build_mesh, Mesh, MeshBuilder, MeshHash, MeshVertex, FACE_DIRECTIONS};
pub use metrics::{stats_to_metrics, write_metrics_to_file, ChunkMeshStat};
pub use sink::{ChunkMeshStore, MeshSink};

use std::collections::BTreeMap;

use mineflayer_world::Vector3i;
use tracing::debug;

use crate::{ChunkMeshStat, Mesh};

/// Receiver of rebuilt chunk geometry.
///
/// The sink owns whatever it displays: replacing a chunk's mesh must
/// discard the previous one for that key.
pub trait MeshSink {
    /// Swap in the latest mesh for the chunk at `key`.
    fn replace_chunk_mesh(&mut self, key: Vector3i, mesh: Mesh);
}

/// In-memory sink keeping the latest mesh per chunk key.
#[derive(Debug, Default)]
pub struct ChunkMeshStore {
    meshes: BTreeMap<Vector3i, Mesh>,
    replacements: usize,
    discarded: usize,
}

impl ChunkMeshStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mesh for a chunk, if one was ever attached.
    pub fn get(&self, key: Vector3i) -> Option<&Mesh> {
        self.meshes.get(&key)
    }

    /// Number of chunks with a mesh.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// True if no mesh has been attached yet.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Chunk keys with a mesh, ascending.
    pub fn keys(&self) -> impl Iterator<Item = Vector3i> + '_ {
        self.meshes.keys().copied()
    }

    /// Triangles across every attached mesh.
    pub fn total_triangles(&self) -> usize {
        self.meshes.values().map(Mesh::triangle_count).sum()
    }

    /// Total `replace_chunk_mesh` calls.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// Meshes dropped because a newer one replaced them.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Per-chunk stats for the current meshes, ascending by key.
    pub fn stats(&self) -> Vec<ChunkMeshStat> {
        self.meshes
            .iter()
            .map(|(&key, mesh)| ChunkMeshStat::of(key, mesh))
            .collect()
    }
}

impl MeshSink for ChunkMeshStore {
    fn replace_chunk_mesh(&mut self, key: Vector3i, mesh: Mesh) {
        self.replacements += 1;
        let triangles = mesh.triangle_count();
        if let Some(previous) = self.meshes.insert(key, mesh) {
            self.discarded += 1;
            debug!(
                %key,
                old_triangles = previous.triangle_count(),
                triangles,
                "replaced chunk mesh"
            );
        } else {
            debug!(%key, triangles, "attached chunk mesh");
        }
    }
}

use std::path::Path;

use anyhow::Result;
use mineflayer_testkit::{ChunkMeshMetric, MeshMetricSink};
use mineflayer_world::Vector3i;

use crate::{Mesh, MeshHash};

/// Mesh stats for one rebuilt chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkMeshStat {
    /// Chunk key this mesh belongs to.
    pub key: Vector3i,
    /// Number of triangles generated for the chunk.
    pub triangles: usize,
    /// Mesh hash for determinism comparisons.
    pub hash: MeshHash,
}

impl ChunkMeshStat {
    /// Summarize `mesh` for the chunk at `key`.
    pub fn of(key: Vector3i, mesh: &Mesh) -> Self {
        Self {
            key,
            triangles: mesh.triangle_count(),
            hash: mesh.hash,
        }
    }
}

/// Convert stats into serializable metrics for CI artifacts.
pub fn stats_to_metrics(stats: &[ChunkMeshStat]) -> Vec<ChunkMeshMetric> {
    stats
        .iter()
        .map(|stat| ChunkMeshMetric {
            chunk: stat.key.to_array(),
            triangles: stat.triangles,
            hash: stat.hash.to_hex(),
        })
        .collect()
}

/// Write metrics to disk using the testkit sink.
pub fn write_metrics_to_file<P: AsRef<Path>>(stats: &[ChunkMeshStat], path: P) -> Result<()> {
    let metrics = stats_to_metrics(stats);
    let mut sink = MeshMetricSink::create(path)?;
    sink.write(&metrics)?;
    Ok(())
}

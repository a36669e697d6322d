use std::collections::BTreeSet;

use mineflayer_assets::{BlockRegistry, TextureAtlas};
use mineflayer_render::{ChunkMeshStat, MeshBuilder, MeshSink, FACE_DIRECTIONS};
use mineflayer_world::{BlockType, ChunkUpdate, Vector3i, VoxelWorld, WorldError};
use thiserror::Error;
use tracing::info;

/// Reasons an update is rejected. The world is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// Extent and block array disagree.
    #[error(transparent)]
    World(#[from] WorldError),
    /// A block type id has no definition.
    #[error("unknown block type {block_type} at {position}")]
    UnknownBlockType {
        /// Offending id.
        block_type: BlockType,
        /// Absolute coordinate of the first cell carrying it.
        position: Vector3i,
    },
}

/// Outcome of one applied update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedUpdate {
    /// Chunks that received writes, ascending.
    pub touched: Vec<Vector3i>,
    /// Every rebuilt chunk, ascending by key. Includes neighbors when enabled.
    pub remeshed: Vec<ChunkMeshStat>,
    /// Number of cells written.
    pub blocks_written: usize,
}

/// Writes incoming updates into the world and rebuilds affected meshes.
pub struct UpdateApplier<'a> {
    registry: &'a BlockRegistry,
    builder: MeshBuilder<'a>,
    remesh_neighbors: bool,
}

impl<'a> UpdateApplier<'a> {
    /// Applier that also remeshes loaded neighbors across the update's edges.
    pub fn new(registry: &'a BlockRegistry, atlas: &'a TextureAtlas) -> Self {
        Self {
            registry,
            builder: MeshBuilder::new(registry, atlas),
            remesh_neighbors: true,
        }
    }

    /// Toggle rebuilding of already-loaded face-adjacent chunks.
    pub fn with_remesh_neighbors(mut self, enabled: bool) -> Self {
        self.remesh_neighbors = enabled;
        self
    }

    /// Validate, write and remesh.
    ///
    /// Each touched chunk is rebuilt exactly once and handed to `sink`.
    pub fn apply_update(
        &self,
        world: &mut VoxelWorld,
        update: &ChunkUpdate,
        sink: &mut impl MeshSink,
    ) -> Result<AppliedUpdate, ApplyError> {
        self.validate(update)?;
        let touched = world.write_update(update)?;

        let mut remesh = touched.clone();
        if self.remesh_neighbors {
            remesh.extend(self.loaded_neighbors(world, update, &touched));
        }

        let world: &VoxelWorld = world;
        let mut remeshed = Vec::with_capacity(remesh.len());
        for key in remesh {
            let Some(chunk) = world.chunk(key) else {
                continue;
            };
            let mesh = self.builder.build(chunk, world);
            remeshed.push(ChunkMeshStat::of(key, &mesh));
            sink.replace_chunk_mesh(key, mesh);
        }

        info!(
            origin = %update.origin,
            size = %update.size,
            touched = touched.len(),
            remeshed = remeshed.len(),
            "applied chunk update"
        );

        Ok(AppliedUpdate {
            touched: touched.into_iter().collect(),
            remeshed,
            blocks_written: update.volume(),
        })
    }

    fn validate(&self, update: &ChunkUpdate) -> Result<(), ApplyError> {
        update.validate()?;
        for (position, block) in update.cells() {
            if !self.registry.contains(block.block_type.id()) {
                return Err(ApplyError::UnknownBlockType {
                    block_type: block.block_type,
                    position,
                });
            }
        }
        Ok(())
    }

    // Loaded chunks not written to but holding a cell face-adjacent to the
    // update box. Their faces toward the box may have changed.
    fn loaded_neighbors(
        &self,
        world: &VoxelWorld,
        update: &ChunkUpdate,
        touched: &BTreeSet<Vector3i>,
    ) -> BTreeSet<Vector3i> {
        let mut neighbors = BTreeSet::new();
        if update.volume() == 0 {
            return neighbors;
        }
        for face in FACE_DIRECTIONS {
            let Some(shifted) = update.origin.checked_add(face.normal()) else {
                continue;
            };
            for key in world.chunk_keys_in_box(shifted, update.size) {
                if !touched.contains(&key) && world.contains_chunk(key) {
                    neighbors.insert(key);
                }
            }
        }
        neighbors
    }
}

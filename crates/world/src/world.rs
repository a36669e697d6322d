use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::{Block, BlockType, Chunk, ChunkUpdate, Vector3i, WorldError, DEFAULT_CHUNK_SIZE};

/// Owning store of every loaded chunk, keyed by chunk-aligned origin.
///
/// Uses a `BTreeMap` so iteration over chunks is deterministic. Chunks are
/// created lazily on first write and never evicted.
#[derive(Debug, Clone)]
pub struct VoxelWorld {
    chunk_size: Vector3i,
    chunks: BTreeMap<Vector3i, Chunk>,
}

impl Default for VoxelWorld {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl VoxelWorld {
    /// Create an empty world whose chunks all have extent `chunk_size`.
    pub fn new(chunk_size: Vector3i) -> Self {
        assert!(
            chunk_size.volume() > 0,
            "chunk size must be positive on every axis, got {chunk_size}"
        );
        Self {
            chunk_size,
            chunks: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn chunk_size(&self) -> Vector3i {
        self.chunk_size
    }

    /// Origin of the chunk containing `coord` (floors towards negative infinity).
    #[inline]
    pub fn chunk_key_of(&self, coord: Vector3i) -> Vector3i {
        coord.align_down(self.chunk_size)
    }

    /// Mutable access to the chunk at `key`, inserting an all-air chunk if absent.
    ///
    /// # Panics
    ///
    /// If `key` is not chunk-aligned. Callers derive keys with [`Self::chunk_key_of`].
    pub fn get_or_create_chunk(&mut self, key: Vector3i) -> &mut Chunk {
        assert!(
            key.is_aligned_to(self.chunk_size),
            "chunk key {key} is not aligned to chunk size {}",
            self.chunk_size
        );
        let chunk_size = self.chunk_size;
        self.chunks.entry(key).or_insert_with(|| {
            debug!(%key, "creating chunk");
            Chunk::new(key, chunk_size)
        })
    }

    /// Block type at a world coordinate. Unloaded space reads as air.
    pub fn block_type_at(&self, coord: Vector3i) -> BlockType {
        self.block_at(coord).block_type
    }

    /// Block at a world coordinate. Unloaded space reads as air.
    pub fn block_at(&self, coord: Vector3i) -> Block {
        let key = self.chunk_key_of(coord);
        match self.chunks.get(&key) {
            Some(chunk) => chunk.block(coord - key),
            None => Block::AIR,
        }
    }

    /// Write a single block, creating its chunk if needed. Returns the chunk key.
    pub fn set_block(&mut self, coord: Vector3i, block: Block) -> Vector3i {
        let key = self.chunk_key_of(coord);
        self.get_or_create_chunk(key).set_block(coord - key, block);
        key
    }

    /// Write every block of `update`, returning the keys of the chunks written to.
    ///
    /// The update is validated first; on error nothing is written.
    pub fn write_update(&mut self, update: &ChunkUpdate) -> Result<BTreeSet<Vector3i>, WorldError> {
        update.validate()?;

        let mut touched = BTreeSet::new();
        for (coord, block) in update.cells() {
            touched.insert(self.set_block(coord, block));
        }
        Ok(touched)
    }

    /// Keys of every chunk (loaded or not) intersecting the box `[min, min + size)`.
    ///
    /// The box is clipped to the `i32` coordinate range.
    pub fn chunk_keys_in_box(&self, min: Vector3i, size: Vector3i) -> Vec<Vector3i> {
        if size.volume() == 0 {
            return Vec::new();
        }
        let far = |min: i32, size: i32| {
            (i64::from(min) + i64::from(size) - 1).min(i64::from(i32::MAX)) as i32
        };
        let first = self.chunk_key_of(min);
        let last = self.chunk_key_of(Vector3i::new(
            far(min.x, size.x),
            far(min.y, size.y),
            far(min.z, size.z),
        ));
        let axis = |first: i32, last: i32, step: i32| {
            (i64::from(first)..=i64::from(last))
                .step_by(step as usize)
                .map(|v| v as i32)
        };

        let mut keys = Vec::new();
        for x in axis(first.x, last.x, self.chunk_size.x) {
            for y in axis(first.y, last.y, self.chunk_size.y) {
                for z in axis(first.z, last.z, self.chunk_size.z) {
                    keys.push(Vector3i::new(x, y, z));
                }
            }
        }
        keys
    }

    pub fn chunk(&self, key: Vector3i) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    pub fn contains_chunk(&self, key: Vector3i) -> bool {
        self.chunks.contains_key(&key)
    }

    /// Number of resident chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Resident chunk keys in ascending order.
    pub fn chunk_keys(&self) -> impl Iterator<Item = Vector3i> + '_ {
        self.chunks.keys().copied()
    }

    /// Resident chunks in ascending key order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }
}

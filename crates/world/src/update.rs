use serde::{Deserialize, Serialize};

use crate::{Block, Vector3i, WorldError};

/// Full or partial overwrite of the block grid in the box `[origin, origin + size)`.
///
/// `blocks` is dense and ordered like chunk storage: x fastest, then y, then z.
/// The record arrives already deserialized from the network collaborator and is
/// validated before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkUpdate {
    pub origin: Vector3i,
    pub size: Vector3i,
    pub blocks: Vec<Block>,
}

impl ChunkUpdate {
    pub fn new(origin: Vector3i, size: Vector3i, blocks: Vec<Block>) -> Self {
        Self {
            origin,
            size,
            blocks,
        }
    }

    /// Update covering the whole box with a single block.
    pub fn filled(origin: Vector3i, size: Vector3i, block: Block) -> Self {
        Self::new(origin, size, vec![block; size.volume()])
    }

    /// One-cell update.
    pub fn single(position: Vector3i, block: Block) -> Self {
        Self::new(position, Vector3i::ONE, vec![block])
    }

    /// Number of cells the declared extent covers.
    pub fn volume(&self) -> usize {
        self.size.volume()
    }

    /// Check the extent against the block array and the coordinate range.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.size.any_negative() {
            return Err(WorldError::NegativeSize {
                origin: self.origin,
                size: self.size,
            });
        }
        if self.origin.checked_add(self.size).is_none() {
            return Err(WorldError::OutOfRange {
                origin: self.origin,
                size: self.size,
            });
        }
        let expected = self.size.checked_volume().ok_or(WorldError::ExtentTooLarge {
            origin: self.origin,
            size: self.size,
        })?;
        if self.blocks.len() != expected {
            return Err(WorldError::SizeMismatch {
                origin: self.origin,
                size: self.size,
                expected,
                actual: self.blocks.len(),
            });
        }
        Ok(())
    }

    /// Position of an offset inside `blocks`.
    pub fn index(&self, offset: Vector3i) -> usize {
        debug_assert!(offset.within(self.size));
        ((offset.z * self.size.y + offset.y) * self.size.x + offset.x) as usize
    }

    /// Block at a local offset of the update box.
    pub fn block(&self, offset: Vector3i) -> Block {
        self.blocks[self.index(offset)]
    }

    /// Every `(absolute coordinate, block)` pair, x outermost.
    pub fn cells(&self) -> impl Iterator<Item = (Vector3i, Block)> + '_ {
        self.size
            .iter_box()
            .map(move |offset| (self.origin + offset, self.block(offset)))
    }
}

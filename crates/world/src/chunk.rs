use crate::{Block, BlockType, Vector3i};

/// Chunk extent used by the world unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: Vector3i = Vector3i::new(16, 16, 128);

/// Dense, fixed-size box of blocks anchored at a chunk-aligned world origin.
///
/// Cells are stored x-fastest, then y, then z.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    origin: Vector3i,
    size: Vector3i,
    blocks: Vec<Block>,
}

impl Chunk {
    /// Allocate a fresh chunk filled with air.
    pub fn new(origin: Vector3i, size: Vector3i) -> Self {
        assert!(
            size.volume() > 0,
            "chunk size must be positive on every axis, got {size}"
        );
        Self {
            origin,
            size,
            blocks: vec![Block::AIR; size.volume()],
        }
    }

    #[inline]
    pub fn origin(&self) -> Vector3i {
        self.origin
    }

    #[inline]
    pub fn size(&self) -> Vector3i {
        self.size
    }

    /// True if `local` addresses a cell of this chunk.
    #[inline]
    pub fn contains_local(&self, local: Vector3i) -> bool {
        local.within(self.size)
    }

    /// True if `coord` (world space) falls inside this chunk.
    pub fn contains_world(&self, coord: Vector3i) -> bool {
        self.contains_local(coord - self.origin)
    }

    fn index(&self, local: Vector3i) -> usize {
        assert!(
            self.contains_local(local),
            "local offset {local} outside chunk {} of size {}",
            self.origin,
            self.size
        );
        ((local.z * self.size.y + local.y) * self.size.x + local.x) as usize
    }

    /// Fetch a block copy.
    pub fn block(&self, local: Vector3i) -> Block {
        self.blocks[self.index(local)]
    }

    #[inline]
    pub fn block_type(&self, local: Vector3i) -> BlockType {
        self.block(local).block_type
    }

    /// Overwrite a block. Returns true if the stored value changed.
    pub fn set_block(&mut self, local: Vector3i, block: Block) -> bool {
        let idx = self.index(local);
        let changed = self.blocks[idx] != block;
        self.blocks[idx] = block;
        changed
    }

    /// Every local offset, in meshing order (x outermost, z innermost).
    pub fn offsets(&self) -> impl Iterator<Item = Vector3i> {
        self.size.iter_box()
    }

    /// Count of non-air cells.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|block| !block.is_air()).count()
    }

    /// True if every cell is air.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_air)
    }

    /// Borrow raw block storage.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: Vector3i = Vector3i::new(4, 3, 2);

    #[test]
    fn new_chunk_is_air() {
        let chunk = Chunk::new(Vector3i::new(16, 0, -128), DEFAULT_CHUNK_SIZE);
        assert!(chunk.is_empty());
        assert_eq!(chunk.solid_count(), 0);
        assert_eq!(chunk.blocks().len(), 16 * 16 * 128);
        assert_eq!(chunk.origin(), Vector3i::new(16, 0, -128));
    }

    #[test]
    fn set_and_get_block() {
        let mut chunk = Chunk::new(Vector3i::ZERO, SMALL);
        let local = Vector3i::new(3, 2, 1);
        assert!(chunk.set_block(local, Block::new(BlockType::STONE)));
        assert_eq!(chunk.block_type(local), BlockType::STONE);
        assert_eq!(chunk.solid_count(), 1);
        assert!(!chunk.is_empty());

        // Same value again is not a change.
        assert!(!chunk.set_block(local, Block::new(BlockType::STONE)));
    }

    #[test]
    fn storage_is_x_fastest() {
        let mut chunk = Chunk::new(Vector3i::ZERO, SMALL);
        chunk.set_block(Vector3i::new(1, 0, 0), Block::new(BlockType::DIRT));
        chunk.set_block(Vector3i::new(0, 1, 0), Block::new(BlockType::SAND));
        chunk.set_block(Vector3i::new(0, 0, 1), Block::new(BlockType::GLASS));

        assert_eq!(chunk.blocks()[1].block_type, BlockType::DIRT);
        assert_eq!(chunk.blocks()[4].block_type, BlockType::SAND);
        assert_eq!(chunk.blocks()[12].block_type, BlockType::GLASS);
    }

    #[test]
    fn offsets_cover_every_cell_once() {
        let chunk = Chunk::new(Vector3i::ZERO, SMALL);
        let offsets: Vec<_> = chunk.offsets().collect();
        assert_eq!(offsets.len(), SMALL.volume());
        assert_eq!(offsets.first(), Some(&Vector3i::ZERO));
        assert_eq!(offsets.last(), Some(&Vector3i::new(3, 2, 1)));
    }

    #[test]
    fn contains_world_respects_origin() {
        let chunk = Chunk::new(Vector3i::new(-4, 0, 2), SMALL);
        assert!(chunk.contains_world(Vector3i::new(-4, 0, 2)));
        assert!(chunk.contains_world(Vector3i::new(-1, 2, 3)));
        assert!(!chunk.contains_world(Vector3i::new(0, 0, 2)));
        assert!(!chunk.contains_world(Vector3i::new(-4, 0, 1)));
    }

    #[test]
    #[should_panic(expected = "outside chunk")]
    fn out_of_range_access_panics() {
        let chunk = Chunk::new(Vector3i::ZERO, SMALL);
        chunk.block(Vector3i::new(4, 0, 0));
    }

    #[test]
    #[should_panic(expected = "chunk size must be positive")]
    fn zero_sized_chunk_is_rejected() {
        Chunk::new(Vector3i::ZERO, Vector3i::new(16, 0, 16));
    }
}

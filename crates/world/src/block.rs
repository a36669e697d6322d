use std::fmt;

use serde::{Deserialize, Serialize};

/// Block-type identifier, the key into the block definition table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockType(pub u16);

impl BlockType {
    /// Empty space. Never produces geometry and never occludes a face.
    pub const AIR: Self = Self(0);
    /// Stone.
    pub const STONE: Self = Self(1);
    /// Grass-topped dirt.
    pub const GRASS: Self = Self(2);
    /// Dirt.
    pub const DIRT: Self = Self(3);
    /// Cobblestone.
    pub const COBBLESTONE: Self = Self(4);
    /// Wooden planks.
    pub const PLANKS: Self = Self(5);
    /// Bedrock.
    pub const BEDROCK: Self = Self(7);
    /// Sand.
    pub const SAND: Self = Self(12);
    /// Gravel.
    pub const GRAVEL: Self = Self(13);
    /// Tree trunk.
    pub const LOG: Self = Self(17);
    /// Leaves.
    pub const LEAVES: Self = Self(18);
    /// Glass.
    pub const GLASS: Self = Self(20);

    #[inline]
    pub const fn id(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == Self::AIR.0
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u16> for BlockType {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

/// A single cell of the block grid.
///
/// `metadata` carries orientation/variant bits straight from the server and is
/// ignored by meshing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub block_type: BlockType,
    #[serde(default)]
    pub metadata: u8,
}

impl Block {
    pub const AIR: Self = Self::new(BlockType::AIR);

    pub const fn new(block_type: BlockType) -> Self {
        Self {
            block_type,
            metadata: 0,
        }
    }

    pub const fn with_metadata(block_type: BlockType, metadata: u8) -> Self {
        Self {
            block_type,
            metadata,
        }
    }

    #[inline]
    pub const fn is_air(&self) -> bool {
        self.block_type.is_air()
    }
}

impl From<BlockType> for Block {
    fn from(block_type: BlockType) -> Self {
        Self::new(block_type)
    }
}

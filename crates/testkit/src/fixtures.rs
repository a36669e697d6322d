//! Asset and world fixtures shared by crate tests.

use anyhow::{Context, Result};
use mineflayer_assets::{registry_from_blocks_txt, BlockRegistry, TextureAtlas, DEFAULT_ATLAS_SIZE};

/// The bundled block definition table.
pub const SAMPLE_BLOCKS_TXT: &str = include_str!("../../../resources/blocks.txt");

/// The bundled texture index for a 256x256 atlas.
pub const SAMPLE_TEXTURES_TXT: &str = include_str!("../../../resources/textures.txt");

/// Registry parsed from [`SAMPLE_BLOCKS_TXT`].
pub fn sample_registry() -> Result<BlockRegistry> {
    registry_from_blocks_txt(SAMPLE_BLOCKS_TXT).context("parse bundled blocks.txt")
}

/// Atlas parsed from [`SAMPLE_TEXTURES_TXT`].
pub fn sample_atlas() -> Result<TextureAtlas> {
    TextureAtlas::parse_index(SAMPLE_TEXTURES_TXT, DEFAULT_ATLAS_SIZE, DEFAULT_ATLAS_SIZE)
        .context("parse bundled textures.txt")
}

/// Registry + atlas pair, cross-checked so every referenced texture exists.
pub fn sample_assets() -> Result<(BlockRegistry, TextureAtlas)> {
    let registry = sample_registry()?;
    let atlas = sample_atlas()?;
    registry
        .validate_textures(&atlas)
        .context("bundled blocks reference missing textures")?;
    Ok((registry, atlas))
}

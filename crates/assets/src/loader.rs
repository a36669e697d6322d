use std::fs;
use std::path::Path;

use crate::{table_records, AssetError};
use crate::{BlockDefinition, BlockRegistry, FaceTextures};

/// Load a block registry from disk, picking the parser by extension.
///
/// `.json` files are JSON packs; anything else is the text table format.
pub fn registry_from_file(path: &Path) -> Result<BlockRegistry, AssetError> {
    let data = fs::read_to_string(path)?;
    if path.extension().is_some_and(|ext| ext == "json") {
        registry_from_json(&data)
    } else {
        registry_from_blocks_txt(&data)
    }
}

/// Load a block registry from an in-memory JSON string.
pub fn registry_from_json(input: &str) -> Result<BlockRegistry, AssetError> {
    let defs = crate::load_blocks_from_str(input)?;
    BlockRegistry::new(defs.into_iter().map(BlockDefinition::from_config).collect())
}

/// Load a block registry from the text table format:
/// `id name top bottom front back left right` per line.
pub fn registry_from_blocks_txt(input: &str) -> Result<BlockRegistry, AssetError> {
    let mut defs = Vec::new();
    for (line, columns) in table_records(input) {
        let [id, name, top, bottom, front, back, left, right] = columns[..] else {
            return Err(AssetError::Malformed {
                line,
                reason: format!("expected 8 columns, found {}", columns.len()),
            });
        };
        let id = id.parse::<u16>().map_err(|_| AssetError::Malformed {
            line,
            reason: format!("'{id}' is not a block id"),
        })?;
        let textures = FaceTextures {
            top: top.to_string(),
            bottom: bottom.to_string(),
            front: front.to_string(),
            back: back.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        };
        defs.push(BlockDefinition::new(id, name, textures));
    }
    BlockRegistry::new(defs)
}

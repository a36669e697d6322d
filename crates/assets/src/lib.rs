#![warn(missing_docs)]
//! Block definition table + texture atlas lookups.

mod atlas;
mod loader;
mod registry;

pub use atlas::{AtlasError, AtlasRegion, TextureAtlas, UvRect, DEFAULT_ATLAS_SIZE};
pub use loader::{registry_from_blocks_txt, registry_from_file, registry_from_json};
pub use registry::{BlockDefinition, BlockFace, BlockRegistry, FaceTextures};

use serde::Deserialize;
use thiserror::Error;

/// Block entry as written in a JSON definition pack.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockConfig {
    /// Numeric block-type id.
    pub id: u16,
    /// Human-readable identifier (e.g., "stone").
    pub name: String,
    /// Atlas entry name to use for all faces (defaults to `name`).
    #[serde(default)]
    pub texture: Option<String>,
    /// Optional per-face textures.
    #[serde(default)]
    pub textures: Option<BlockTextureConfig>,
}

/// Errors emitted during pack loading.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read asset pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse asset pack: {0}")]
    Json(#[from] serde_json::Error),
    /// A line of a text table could not be parsed.
    #[error("malformed block table at line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// Two definitions share an id.
    #[error("duplicate block id {0}")]
    DuplicateId(u16),
    /// Two definitions share a name.
    #[error("duplicate block name '{0}'")]
    DuplicateName(String),
    /// A definition references a texture the atlas does not have.
    #[error("block '{block}' references unknown texture '{texture}'")]
    UnknownTexture {
        /// Block name.
        block: String,
        /// Missing atlas entry.
        texture: String,
    },
}

/// Parse a JSON string into a list of block entries.
pub fn load_blocks_from_str(input: &str) -> Result<Vec<BlockConfig>, AssetError> {
    Ok(serde_json::from_str(input)?)
}

/// Configuration for per-face textures.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BlockTextureConfig {
    /// Apply to all faces when specified.
    pub all: Option<String>,
    /// Apply to all side faces when specified.
    pub side: Option<String>,
    /// Specific texture for the top (+Y) face.
    pub top: Option<String>,
    /// Specific texture for the bottom (-Y) face.
    pub bottom: Option<String>,
    /// Specific texture for the front (+Z) face.
    pub front: Option<String>,
    /// Specific texture for the back (-Z) face.
    pub back: Option<String>,
    /// Specific texture for the left (-X) face.
    pub left: Option<String>,
    /// Specific texture for the right (+X) face.
    pub right: Option<String>,
}

/// Whitespace-separated records of a text table, skipping blank and `#` lines.
///
/// Yields `(1-based line number, columns)`.
pub(crate) fn table_records(input: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    input.lines().enumerate().filter_map(|(idx, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some((idx + 1, line.split_whitespace().collect()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_records_skip_comments_and_blanks() {
        let input = "# header\n\nstone 0 0 16 16\n   \n  dirt   16 0 16 16  \n";
        let records: Vec<_> = table_records(input).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], (3, vec!["stone", "0", "0", "16", "16"]));
        assert_eq!(records[1].0, 5);
        assert_eq!(records[1].1[0], "dirt");
    }

    #[test]
    fn block_config_defaults_optional_fields() {
        let blocks = load_blocks_from_str(r#"[{"id": 1, "name": "stone"}]"#).unwrap();
        assert_eq!(blocks[0].id, 1);
        assert!(blocks[0].texture.is_none());
        assert!(blocks[0].textures.is_none());
    }
}

use anyhow::{Context, Result};
use mineflayer_client::ConnectionSettings;
use mineflayer_world::{Vector3i, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/client.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub connection: ConnectionSettings,
    pub resources: ResourcesConfig,
    pub world: WorldConfig,
    pub session: SessionConfig,
}

/// Block table and texture index locations.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// `blocks.txt` table or a JSON block list.
    pub blocks: PathBuf,
    /// `textures.txt` index or a JSON atlas.
    pub textures: PathBuf,
    pub atlas_width: u32,
    pub atlas_height: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunk extent as `[x, y, z]`.
    pub chunk_size: [i32; 3],
    pub remesh_neighbors: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Stop at the first rejected update.
    pub strict: bool,
    /// Newline-delimited JSON event log to replay.
    pub replay: Option<PathBuf>,
    /// Where to write per-chunk mesh metrics after the run.
    pub mesh_metrics: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            connection: ConnectionSettings::default(),
            resources: ResourcesConfig::default(),
            world: WorldConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            blocks: PathBuf::from("resources/blocks.txt"),
            textures: PathBuf::from("resources/textures.txt"),
            atlas_width: mineflayer_assets::DEFAULT_ATLAS_SIZE,
            atlas_height: mineflayer_assets::DEFAULT_ATLAS_SIZE,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE.to_array(),
            remesh_neighbors: true,
        }
    }
}

impl WorldConfig {
    /// Configured chunk extent, or `None` if any axis is not positive.
    pub fn chunk_size(&self) -> Option<Vector3i> {
        let size = Vector3i::from(self.chunk_size);
        (size.x > 0 && size.y > 0 && size.z > 0).then_some(size)
    }
}

impl ClientConfig {
    /// Read and parse `path`.
    pub fn try_load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Falls back to defaults when `loaded` failed, logging why.
    pub fn or_defaults(loaded: Result<Self>) -> Self {
        match loaded {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("{err:#}. Using defaults");
                ClientConfig::default()
            }
        }
    }
}

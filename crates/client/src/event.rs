//! Already-deserialized server events handed over by the network layer.

use mineflayer_world::ChunkUpdate;
use serde::{Deserialize, Serialize};

/// Player position as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityPosition {
    /// X coordinate in blocks.
    pub x: f64,
    /// Y coordinate (feet) in blocks.
    pub y: f64,
    /// Z coordinate in blocks.
    pub z: f64,
    /// Eye height coordinate, when the server sends one.
    #[serde(default)]
    pub stance: Option<f64>,
    /// Whether the player is standing on a block.
    #[serde(default)]
    pub on_ground: bool,
}

impl EntityPosition {
    /// Position without stance information.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            ..Self::default()
        }
    }
}

/// Event log entry consumed by the client session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// A box of blocks was overwritten.
    ChunkUpdated(ChunkUpdate),
    /// The local player moved.
    PlayerPositionUpdated(EntityPosition),
}

impl ServerEvent {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::ChunkUpdated(_) => "chunk_updated",
            ServerEvent::PlayerPositionUpdated(_) => "player_position_updated",
        }
    }
}
